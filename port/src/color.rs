/// RGBA colors and the packed keys used to index them.
///
/// Every fully transparent color collapses to the same key, so all transparent pixels
/// share one palette slot regardless of what their RGB channels hold.

use std::fmt;

/// 8-bit straight-alpha RGBA color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Transparent black, the content of every unclaimed palette slot.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline(always)]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline(always)]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    #[inline(always)]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline(always)]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    #[inline(always)]
    pub const fn key(self) -> ColorKey {
        ColorKey::of(self)
    }
}

impl From<[u8; 4]> for Color {
    #[inline(always)]
    fn from(c: [u8; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Color> for [u8; 4] {
    #[inline(always)]
    fn from(c: Color) -> [u8; 4] {
        c.to_array()
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    #[inline(always)]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl fmt::Display for Color {
    /// `#RRGGBBAA`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

// ============================================================================
// ColorKey
// ============================================================================

/// Packed `R<<24 | G<<16 | B<<8 | A` lookup key.
///
/// Any color with `A == 0` maps to [`ColorKey::TRANSPARENT`] (the value `0`). An opaque or
/// translucent color can never produce `0` because its low byte is non-zero, so the
/// collapse cannot alias a visible color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(u32);

impl ColorKey {
    pub const TRANSPARENT: ColorKey = ColorKey(0);

    #[inline(always)]
    pub const fn of(c: Color) -> Self {
        if c.a == 0 {
            return Self::TRANSPARENT;
        }
        Self(((c.r as u32) << 24) | ((c.g as u32) << 16) | ((c.b as u32) << 8) | c.a as u32)
    }

    #[inline(always)]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn is_transparent(self) -> bool {
        self.0 == 0
    }
}

impl From<Color> for ColorKey {
    #[inline(always)]
    fn from(c: Color) -> Self {
        Self::of(c)
    }
}
