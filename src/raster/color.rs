//! Colors: opaque RGB, RGBA for the vector layer, and the 16-entry palette.

use crate::error::{CanvasError, Result};

/// True-color RGB representation.
///
/// Uses 3 bytes for 24-bit color depth. This is the pixel type of every
/// opaque [`Frame`](super::Frame) and the color tag of printed text.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default foreground (white)
    pub const DEFAULT_FG: Self = Self::WHITE;
    /// Default background (black)
    pub const DEFAULT_BG: Self = Self::BLACK;

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Pack into a 24-bit hex value.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Build a color from unchecked integer components.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::OutOfRange`] naming the first component outside
    /// `0..=255`.
    pub fn checked(op: &'static str, r: i64, g: i64, b: i64) -> Result<Self> {
        Ok(Self::new(
            crate::error::component(op, r)?,
            crate::error::component(op, g)?,
            crate::error::component(op, b)?,
        ))
    }

    /// Attach an alpha channel.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Source-over blend `src` onto this opaque color.
    #[inline]
    #[must_use]
    pub const fn blend(self, src: Rgba) -> Self {
        match src.a {
            0 => self,
            255 => src.rgb(),
            a => Self::new(
                blend_channel(src.r, self.r, a),
                blend_channel(src.g, self.g, a),
                blend_channel(src.b, self.b, a),
            ),
        }
    }
}

/// Alpha blend a single channel, rounded to nearest.
#[inline]
const fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

/// RGB plus coverage, the pixel type of the vector layer.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent. The color bits are blue so an accidental opaque
    /// rendering is visible.
    pub const TRANSPARENT: Self = Self::new(0, 0, 255, 0);

    /// Drop the alpha channel.
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Whether this pixel carries no coverage.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<Rgb> for Rgba {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(255)
    }
}

/// The 16 named colors, indexed 0 through 15.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    /// (0, 0, 0)
    Black = 0,
    /// (0, 0, 128)
    DarkBlue = 1,
    /// (0, 128, 0)
    DarkGreen = 2,
    /// (0, 128, 128)
    DarkCyan = 3,
    /// (128, 0, 0)
    DarkRed = 4,
    /// (128, 0, 128)
    DarkMagenta = 5,
    /// (128, 128, 0)
    DarkYellow = 6,
    /// (192, 192, 192)
    Gray = 7,
    /// (128, 128, 128)
    DarkGray = 8,
    /// (0, 0, 255)
    Blue = 9,
    /// (0, 255, 0)
    Green = 10,
    /// (0, 255, 255)
    Cyan = 11,
    /// (255, 0, 0)
    Red = 12,
    /// (255, 0, 255)
    Magenta = 13,
    /// (255, 255, 0)
    Yellow = 14,
    /// (255, 255, 255)
    White = 15,
}

impl NamedColor {
    /// All palette entries in index order.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkCyan,
        Self::DarkRed,
        Self::DarkMagenta,
        Self::DarkYellow,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Cyan,
        Self::Red,
        Self::Magenta,
        Self::Yellow,
        Self::White,
    ];

    /// The RGB value of this palette entry.
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0, 0, 0),
            Self::DarkBlue => Rgb::new(0, 0, 128),
            Self::DarkGreen => Rgb::new(0, 128, 0),
            Self::DarkCyan => Rgb::new(0, 128, 128),
            Self::DarkRed => Rgb::new(128, 0, 0),
            Self::DarkMagenta => Rgb::new(128, 0, 128),
            Self::DarkYellow => Rgb::new(128, 128, 0),
            Self::Gray => Rgb::new(192, 192, 192),
            Self::DarkGray => Rgb::new(128, 128, 128),
            Self::Blue => Rgb::new(0, 0, 255),
            Self::Green => Rgb::new(0, 255, 0),
            Self::Cyan => Rgb::new(0, 255, 255),
            Self::Red => Rgb::new(255, 0, 0),
            Self::Magenta => Rgb::new(255, 0, 255),
            Self::Yellow => Rgb::new(255, 255, 0),
            Self::White => Rgb::new(255, 255, 255),
        }
    }

    /// Look up a palette entry by index.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::OutOfRange`] for indices outside `0..=15`.
    pub fn from_index(op: &'static str, index: i64) -> Result<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| CanvasError::out_of_range(op, index, CanvasError::PALETTE))
    }
}

impl From<NamedColor> for Rgb {
    #[inline]
    fn from(named: NamedColor) -> Self {
        named.rgb()
    }
}
