//! Fixed 256-slot RGBA palette.
//!
//! Slot 0 is reserved by convention for the transparent color. A palette supplied as an
//! image must be exactly 256x1; anything else is not a palette and is rejected with
//! [`PaletteError::InputShape`] so the caller can treat it as a regular image instead.

use std::ops::Index;

use crate::buffer::ColorBuffer;
use crate::color::Color;
use crate::error::{PaletteError, Result};

pub const PALETTE_SIZE: usize = 256;
pub const PALETTE_BYTES: usize = PALETTE_SIZE * 4;

/// Whether an image of these dimensions can be a palette strip
#[inline]
pub fn is_palette_shape(width: u32, height: u32) -> bool {
    width as usize == PALETTE_SIZE && height == 1
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    slots: [Color; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self { slots: [Color::TRANSPARENT; PALETTE_SIZE] }
    }
}

impl Palette {
    /// All slots transparent black
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_colors(colors: [Color; PALETTE_SIZE]) -> Self {
        Self { slots: colors }
    }

    /// Palette from exactly 1024 interleaved RGBA bytes
    pub fn from_rgba_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != PALETTE_BYTES {
            return Err(PaletteError::BufferSize { expected: PALETTE_BYTES, actual: data.len() });
        }
        let mut palette = Self::new();
        for (slot, c) in palette.slots.iter_mut().zip(data.chunks_exact(4)) {
            *slot = Color::new(c[0], c[1], c[2], c[3]);
        }
        Ok(palette)
    }

    /// Palette from a decoded 256x1 image
    pub fn from_image(image: &ColorBuffer) -> Result<Self> {
        let (width, height) = image.dimensions();
        if !is_palette_shape(width, height) {
            return Err(PaletteError::InputShape { width, height });
        }
        let mut palette = Self::new();
        palette.slots.copy_from_slice(image.pixels());
        Ok(palette)
    }

    #[inline]
    pub fn get(&self, slot: u8) -> Color {
        self.slots[slot as usize]
    }

    #[inline]
    pub fn set(&mut self, slot: u8, color: Color) {
        self.slots[slot as usize] = color;
    }

    /// Exchange the raw colors of two slots. Does not touch any lookup table.
    #[inline]
    pub fn swap(&mut self, a: u8, b: u8) {
        self.slots.swap(a as usize, b as usize);
    }

    #[inline]
    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.slots
    }

    /// Slots with their colors, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (u8, Color)> + '_ {
        self.slots.iter().enumerate().map(|(i, c)| (i as u8, *c))
    }

    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.slots.iter().flat_map(|c| c.to_array()).collect()
    }

    /// The palette as a 256x1 strip
    pub fn to_image(&self) -> ColorBuffer {
        ColorBuffer::from_pixels(self.slots.to_vec(), PALETTE_SIZE as u32, 1)
    }
}

impl Index<u8> for Palette {
    type Output = Color;
    #[inline(always)]
    fn index(&self, slot: u8) -> &Color {
        &self.slots[slot as usize]
    }
}
