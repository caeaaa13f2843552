//! Owner-thread dispatch bridge
//!
//! Native objects are single-apartment: only the owner thread may touch
//! them. This module is the synchronization primitive that lets any calling
//! thread hand a closure to the owner thread and block until it has run.
//!
//! Dispatch is modeled as a request/response channel pair rather than a raw
//! condvar handshake: [`owner_channel`] yields a cloneable [`OwnerDispatcher`]
//! for calling threads and one [`OwnerLoop`] that the owner thread drains.
//! Each call posts a job carrying a private single-use reply channel and
//! blocks on the reply; the owner loop executes jobs strictly one at a time,
//! in FIFO order per poster, and answers each reply exactly once.
//!
//! There is no timeout and no cancellation. Dispatching *from* the owner
//! thread can never complete (the loop would have to service a job while
//! blocked inside one), so the dispatcher detects that case and panics
//! instead of hanging.

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

/// A unit of work posted to the owner thread.
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Errors a dispatch call can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The owner loop is gone, or the job died before answering.
    /// The caller is released either way.
    #[error("owner thread is no longer servicing dispatch requests")]
    Disconnected,
}

/// State shared between the dispatcher clones and the owner loop.
struct Shared {
    /// Identity of the thread currently adopted as the owner
    owner: Mutex<Option<ThreadId>>,
    /// Number of jobs posted, for instrumentation
    posted: AtomicU64,
}

/// Calling-thread half of the dispatch bridge. Cheap to clone; all clones
/// feed the same owner loop.
#[derive(Clone)]
pub struct OwnerDispatcher {
    jobs: Sender<Job>,
    shared: Arc<Shared>,
}

/// Owner-thread half of the dispatch bridge: the work queue to drain.
pub struct OwnerLoop {
    jobs: Receiver<Job>,
    shared: Arc<Shared>,
}

/// Create a connected dispatcher/loop pair.
pub fn owner_channel() -> (OwnerDispatcher, OwnerLoop) {
    let (jobs_tx, jobs_rx) = channel::unbounded();
    let shared = Arc::new(Shared {
        owner: Mutex::new(None),
        posted: AtomicU64::new(0),
    });
    (
        OwnerDispatcher {
            jobs: jobs_tx,
            shared: shared.clone(),
        },
        OwnerLoop {
            jobs: jobs_rx,
            shared,
        },
    )
}

impl OwnerDispatcher {
    /// Execute a closure on the owner thread and return its result, blocking
    /// the calling thread until the closure has run.
    ///
    /// # Panics
    ///
    /// Panics when called from the owner thread itself: such a call blocks
    /// on a reply the busy owner loop can never produce.
    pub fn call<R, F>(&self, job: F) -> Result<R, DispatchError>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        self.check_not_owner();
        let (reply_tx, reply_rx) = channel::bounded(1);
        self.post(Box::new(move || {
            let _ = reply_tx.send(job());
        }))?;
        // The reply channel carries the result; a populated slot on wake is
        // guaranteed by construction. Disconnection means the job died.
        reply_rx.recv().map_err(|_| DispatchError::Disconnected)
    }

    /// Execute a closure that produces no result on the owner thread,
    /// blocking the calling thread until it has completed.
    ///
    /// # Panics
    ///
    /// Panics when called from the owner thread itself, as [`Self::call`].
    pub fn run<F>(&self, job: F) -> Result<(), DispatchError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.check_not_owner();
        let (done_tx, done_rx) = channel::bounded(1);
        self.post(Box::new(move || {
            job();
            let _ = done_tx.send(());
        }))?;
        done_rx.recv().map_err(|_| DispatchError::Disconnected)
    }

    /// Number of jobs posted through this bridge so far.
    pub fn dispatch_count(&self) -> u64 {
        self.shared.posted.load(Ordering::Relaxed)
    }

    /// Check whether the current thread has been adopted as the owner.
    pub fn is_owner_thread(&self) -> bool {
        *self.shared.owner.lock() == Some(thread::current().id())
    }

    fn check_not_owner(&self) {
        assert!(
            !self.is_owner_thread(),
            "owner-thread dispatch re-entered from the owner thread; the call can never complete"
        );
    }

    fn post(&self, job: Job) -> Result<(), DispatchError> {
        self.jobs
            .send(job)
            .map_err(|_| DispatchError::Disconnected)?;
        self.shared.posted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl std::fmt::Debug for OwnerDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerDispatcher")
            .field("dispatched", &self.dispatch_count())
            .finish()
    }
}

impl OwnerLoop {
    /// Run the owner event loop on the current thread.
    ///
    /// Adopts the current thread as the owner, then services jobs one at a
    /// time until every dispatcher clone has been dropped.
    pub fn run(self) {
        self.adopt();
        while let Ok(job) = self.jobs.recv() {
            Self::execute(job);
        }
    }

    /// Service the jobs already queued, without blocking for more.
    ///
    /// Adopts the current thread as the owner. Returns the number of jobs
    /// serviced. This is the hook for hosts that pump the queue from their
    /// own event loop, and for tests that stand in as a fake owner thread.
    pub fn service_pending(&self) -> usize {
        self.adopt();
        let mut serviced = 0;
        while let Ok(job) = self.jobs.try_recv() {
            Self::execute(job);
            serviced += 1;
        }
        serviced
    }

    fn adopt(&self) {
        *self.shared.owner.lock() = Some(thread::current().id());
    }

    fn execute(job: Job) {
        // A panicking job must not take the owner loop down with it; the
        // blocked caller is released through the dropped reply channel.
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            tracing::error!("owner-thread job panicked; caller released via reply-channel disconnect");
        }
    }
}

/// A dedicated owner thread running an [`OwnerLoop`].
///
/// Hosts that embed the bridge into an existing UI event loop drive an
/// [`OwnerLoop`] themselves; this is the convenience for everything else.
pub struct OwnerThread {
    dispatcher: OwnerDispatcher,
    handle: JoinHandle<()>,
}

impl OwnerThread {
    /// Spawn a named owner thread and start its loop.
    pub fn spawn() -> std::io::Result<Self> {
        let (dispatcher, owner_loop) = owner_channel();
        let handle = thread::Builder::new()
            .name("sill-owner".into())
            .spawn(move || owner_loop.run())?;
        Ok(Self { dispatcher, handle })
    }

    /// The dispatcher feeding this thread. Clone it into the registry.
    pub fn dispatcher(&self) -> &OwnerDispatcher {
        &self.dispatcher
    }

    /// Drop this handle's dispatcher and wait for the loop to exit.
    ///
    /// The loop only exits once *every* dispatcher clone has been dropped;
    /// join while a registry still holds one and this blocks until the
    /// registry goes away too.
    pub fn join(self) {
        let OwnerThread { dispatcher, handle } = self;
        drop(dispatcher);
        let _ = handle.join();
    }
}
