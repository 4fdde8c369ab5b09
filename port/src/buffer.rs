/// Image buffers for the two raster forms the engine works with
///
/// ColorBuffer holds straight RGBA colors, IndexBuffer holds palette slot references.
/// Both are plain row-major rasters; the pixel order is the raster scan order that
/// palette building depends on.

use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::pixel::{self, IndexedPixel};

fn check_len(actual: usize, width: u32, height: u32, channels: usize) -> Result<()> {
    let expected = (width as usize) * (height as usize) * channels;
    if actual != expected {
        return Err(PaletteError::BufferSize { expected, actual });
    }
    Ok(())
}

// ============================================================================
// ColorBuffer - full-color RGBA raster
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl ColorBuffer {
    /// Create buffer from interleaved RGBA bytes
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> Result<Self> {
        check_len(data.len(), width, height, 4)?;
        Ok(Self {
            pixels: pixel::interleaved_to_colors(data),
            width,
            height,
        })
    }

    pub fn from_colors(pixels: Vec<Color>, width: u32, height: u32) -> Result<Self> {
        check_len(pixels.len(), width, height, 1)?;
        Ok(Self { pixels, width, height })
    }

    pub(crate) fn from_pixels(pixels: Vec<Color>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self { pixels, width, height }
    }

    /// Buffer of the given size filled with transparent black
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Color::TRANSPARENT; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y as usize) * (self.width as usize) + x as usize).copied()
    }

    /// Interleaved RGBA bytes, ready for a canvas or an encoder
    pub fn to_rgba(&self) -> Vec<u8> {
        pixel::colors_to_interleaved(&self.pixels)
    }
}

// ============================================================================
// IndexBuffer - indexed raster (one palette slot per pixel)
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexBuffer {
    pixels: Vec<IndexedPixel>,
    width: u32,
    height: u32,
}

impl IndexBuffer {
    /// Create buffer from one slot byte per pixel
    pub fn from_slots(data: &[u8], width: u32, height: u32) -> Result<Self> {
        check_len(data.len(), width, height, 1)?;
        Ok(Self {
            pixels: data.iter().copied().map(IndexedPixel).collect(),
            width,
            height,
        })
    }

    /// Create buffer from a gray display raster (interleaved RGBA, slot in the red channel)
    pub fn from_display_rgba(data: &[u8], width: u32, height: u32) -> Result<Self> {
        check_len(data.len(), width, height, 4)?;
        Ok(Self {
            pixels: pixel::display_to_indexed(data),
            width,
            height,
        })
    }

    /// Read a decoded gray display image back into slots
    pub fn from_display_image(image: &ColorBuffer) -> Self {
        let pixels = image
            .pixels()
            .iter()
            .map(|c| IndexedPixel::from_display(c.to_array()))
            .collect();
        Self {
            pixels,
            width: image.width(),
            height: image.height(),
        }
    }

    pub(crate) fn from_pixels(pixels: Vec<IndexedPixel>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self { pixels, width, height }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[IndexedPixel] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<IndexedPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y as usize) * (self.width as usize) + x as usize).copied()
    }

    /// One slot byte per pixel
    pub fn to_slots(&self) -> Vec<u8> {
        self.pixels.iter().map(|p| p.slot()).collect()
    }

    /// Gray display raster: `[slot, slot, slot, 0|255]` per pixel
    pub fn to_display_rgba(&self) -> Vec<u8> {
        pixel::indexed_to_display(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorbuffer_from_rgba() {
        let data = vec![10, 20, 30, 255, 0, 0, 0, 0];
        let buf = ColorBuffer::from_rgba(&data, 2, 1).unwrap();
        assert_eq!(buf.dimensions(), (2, 1));
        assert_eq!(buf.pixel_count(), 2);
        assert_eq!(buf.get(0, 0), Some(Color::new(10, 20, 30, 255)));
        assert_eq!(buf.get(2, 0), None);
        assert_eq!(buf.to_rgba(), data);
    }

    #[test]
    fn test_colorbuffer_size_mismatch() {
        let err = ColorBuffer::from_rgba(&[0u8; 7], 2, 1).unwrap_err();
        assert_eq!(err, PaletteError::BufferSize { expected: 8, actual: 7 });
    }

    #[test]
    fn test_indexbuffer_slots() {
        let buf = IndexBuffer::from_slots(&[0, 1, 2, 3], 2, 2).unwrap();
        assert_eq!(buf.get(1, 1), Some(IndexedPixel(3)));
        assert_eq!(buf.to_slots(), vec![0, 1, 2, 3]);
        assert_eq!(&buf.to_display_rgba()[..8], &[0, 0, 0, 0, 1, 1, 1, 255]);
    }

    #[test]
    fn test_indexbuffer_from_display() {
        let raster = vec![5, 5, 5, 255, 0, 0, 0, 0, 9, 9, 9, 255];
        let buf = IndexBuffer::from_display_rgba(&raster, 3, 1).unwrap();
        assert_eq!(buf.to_slots(), vec![5, 0, 9]);
        assert!(IndexBuffer::from_display_rgba(&raster, 2, 1).is_err());
    }

    #[test]
    fn test_indexbuffer_from_display_image() {
        let image = ColorBuffer::from_colors(
            vec![Color::new(4, 4, 4, 255), Color::TRANSPARENT],
            1,
            2,
        )
        .unwrap();
        let buf = IndexBuffer::from_display_image(&image);
        assert_eq!(buf.dimensions(), (1, 2));
        assert_eq!(buf.to_slots(), vec![4, 0]);
    }

    #[test]
    fn test_blank() {
        let buf = ColorBuffer::blank(3, 2);
        assert_eq!(buf.pixel_count(), 6);
        assert!(buf.pixels().iter().all(|c| *c == Color::TRANSPARENT));
    }
}
