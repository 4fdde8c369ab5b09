/// Indexed pixel type and interleaved byte conversions
///
/// An indexed pixel is a palette slot number. For display it is packed into a 4-channel
/// raster as `[slot, slot, slot, alpha]` so the slot reads as a gray level; the alpha is
/// derived (0 for slot 0, 255 otherwise) and never stored.

use crate::color::Color;

/// Palette slot reference held by one pixel of an indexed image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndexedPixel(pub u8);

impl IndexedPixel {
    pub const TRANSPARENT: IndexedPixel = IndexedPixel(0);

    #[inline(always)]
    pub const fn slot(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn alpha(self) -> u8 {
        if self.0 == 0 { 0 } else { 255 }
    }

    /// Gray display form: the slot in all three color channels plus the derived alpha.
    #[inline(always)]
    pub const fn to_display(self) -> [u8; 4] {
        [self.0, self.0, self.0, self.alpha()]
    }

    /// Read a slot back from a gray display pixel.
    ///
    /// Only the red channel is consulted; the three color channels are equal for anything
    /// this crate produced.
    #[inline(always)]
    pub const fn from_display(px: [u8; 4]) -> Self {
        Self(px[0])
    }
}

impl From<u8> for IndexedPixel {
    #[inline(always)]
    fn from(slot: u8) -> Self {
        Self(slot)
    }
}

impl From<IndexedPixel> for u8 {
    #[inline(always)]
    fn from(p: IndexedPixel) -> u8 {
        p.0
    }
}

// ============================================================================
// Conversion between formats
// ============================================================================

/// Convert interleaved RGBA bytes (r0,g0,b0,a0,r1,...) to colors
pub fn interleaved_to_colors(data: &[u8]) -> Vec<Color> {
    debug_assert_eq!(data.len() % 4, 0);

    data.chunks_exact(4)
        .map(|c| Color::new(c[0], c[1], c[2], c[3]))
        .collect()
}

/// Convert colors to interleaved RGBA bytes
pub fn colors_to_interleaved(colors: &[Color]) -> Vec<u8> {
    let mut data = Vec::with_capacity(colors.len() * 4);
    for c in colors {
        data.extend_from_slice(&c.to_array());
    }
    data
}

/// Convert a gray display raster (interleaved RGBA) to indexed pixels
pub fn display_to_indexed(data: &[u8]) -> Vec<IndexedPixel> {
    debug_assert_eq!(data.len() % 4, 0);

    data.chunks_exact(4)
        .map(|c| IndexedPixel::from_display([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Convert indexed pixels to a gray display raster (interleaved RGBA)
pub fn indexed_to_display(pixels: &[IndexedPixel]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_display()).collect()
}
