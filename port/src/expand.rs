/// Indexed raster -> full-color raster
///
/// Each slot is copied verbatim from the palette, alpha included. Slots are `u8`, so
/// every value addresses one of the 256 entries and no range check is needed.

use crate::buffer::{ColorBuffer, IndexBuffer};
use crate::color::Color;
use crate::palette::Palette;

pub fn expand(image: &IndexBuffer, palette: &Palette) -> ColorBuffer {
    let pixels: Vec<Color> = image.pixels().iter().map(|p| palette[p.slot()]).collect();
    let (width, height) = image.dimensions();
    ColorBuffer::from_pixels(pixels, width, height)
}

/// Expand in place into an existing buffer of the same dimensions
pub fn expand_into(image: &IndexBuffer, palette: &Palette, out: &mut ColorBuffer) {
    debug_assert_eq!(image.dimensions(), out.dimensions());
    for (dst, src) in out.pixels_mut().iter_mut().zip(image.pixels()) {
        *dst = palette[src.slot()];
    }
}
