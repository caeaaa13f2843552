//! Color — RGBA color with display-name resolution
//!
//! The native model describes solid color visuals by a display name rather
//! than raw channels, so the bridge needs a way to turn an arbitrary color
//! into the closest well-known name. Resolution is nearest-match over a
//! fixed table; alpha is ignored for naming.

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

/// Well-known display colors, nearest-matched by `display_name`.
const NAMED: &[(&str, Color)] = &[
    ("Black", Color::rgb(0, 0, 0)),
    ("White", Color::rgb(255, 255, 255)),
    ("Gray", Color::rgb(128, 128, 128)),
    ("Silver", Color::rgb(192, 192, 192)),
    ("Red", Color::rgb(255, 0, 0)),
    ("Maroon", Color::rgb(128, 0, 0)),
    ("Orange", Color::rgb(255, 165, 0)),
    ("Brown", Color::rgb(139, 69, 19)),
    ("Yellow", Color::rgb(255, 255, 0)),
    ("Olive", Color::rgb(128, 128, 0)),
    ("Lime", Color::rgb(0, 255, 0)),
    ("Green", Color::rgb(0, 128, 0)),
    ("Teal", Color::rgb(0, 128, 128)),
    ("Cyan", Color::rgb(0, 255, 255)),
    ("Blue", Color::rgb(0, 0, 255)),
    ("Navy", Color::rgb(0, 0, 128)),
    ("Purple", Color::rgb(128, 0, 128)),
    ("Magenta", Color::rgb(255, 0, 255)),
    ("Pink", Color::rgb(255, 192, 203)),
];

impl Color {
    /// Create an opaque color from red, green, and blue channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from all four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Resolve the human-readable display name of this color.
    ///
    /// Always succeeds: the closest entry of the well-known table wins.
    pub fn display_name(&self) -> &'static str {
        let mut best = NAMED[0];
        let mut best_distance = u32::MAX;
        for &(name, reference) in NAMED {
            let distance = self.distance_squared(&reference);
            if distance < best_distance {
                best_distance = distance;
                best = (name, reference);
            }
        }
        best.0
    }

    fn distance_squared(&self, other: &Color) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}
