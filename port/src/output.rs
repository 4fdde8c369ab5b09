//! PNG encoding for the three rasters a session produces.
//!
//! - color image: 8-bit RGBA
//! - indexed image: either the gray display form (RGBA) or a true palettized PNG whose
//!   pixel bytes are the slots and whose PLTE/tRNS chunks carry the palette
//! - palette: a 256x1 RGBA strip, the shape a palette file is recognised by

use crate::buffer::{ColorBuffer, IndexBuffer};
use crate::error::{PaletteError, Result};
use crate::palette::Palette;

fn encode_png(
    data: &[u8],
    width: u32,
    height: u32,
    color: png::ColorType,
    palette: Option<&Palette>,
) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut output, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);

        if let Some(palette) = palette {
            let rgb: Vec<u8> = palette.colors().iter().flat_map(|c| [c.r, c.g, c.b]).collect();
            let alpha: Vec<u8> = palette.colors().iter().map(|c| c.a).collect();
            encoder.set_palette(rgb);
            encoder.set_trns(alpha);
        }

        let mut writer = encoder
            .write_header()
            .map_err(|e| PaletteError::Encode(format!("PNG header error: {}", e)))?;
        writer
            .write_image_data(data)
            .map_err(|e| PaletteError::Encode(format!("PNG write error: {}", e)))?;
    }
    Ok(output)
}

/// Encode a color image as RGBA PNG
pub fn encode_rgba_png(image: &ColorBuffer) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    encode_png(&image.to_rgba(), width, height, png::ColorType::Rgba, None)
}

/// Encode an indexed image in its gray display form (slot as gray level, RGBA)
pub fn encode_display_png(image: &IndexBuffer) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    encode_png(&image.to_display_rgba(), width, height, png::ColorType::Rgba, None)
}

/// Encode the palette as a 256x1 RGBA strip
pub fn encode_palette_png(palette: &Palette) -> Result<Vec<u8>> {
    encode_rgba_png(&palette.to_image())
}

/// Encode an indexed image as an 8-bit palettized PNG.
///
/// All 256 entries are written, so every slot byte is a valid PLTE index.
pub fn encode_palettized_png(image: &IndexBuffer, palette: &Palette) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    encode_png(&image.to_slots(), width, height, png::ColorType::Indexed, Some(palette))
}
