//! Image decoding to 8-bit straight RGBA
//!
//! Any format the `image` crate is built with is accepted; the pixels are converted to
//! RGBA8 (indexed PNGs are expanded through their PLTE/tRNS chunks on the way).
//! Used by both WASM and CLI for consistent behavior.

use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use crate::buffer::ColorBuffer;
use crate::error::{PaletteError, Result};

/// Load image from file path
pub fn load_image_from_path<P: AsRef<Path>>(path: P) -> Result<ColorBuffer> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let reader = ImageReader::open(path)
        .map_err(|e| PaletteError::Decode(format!("Failed to load \"{}\": {}", name, e)))?
        .with_guessed_format()
        .map_err(|e| PaletteError::Decode(format!("Failed to load \"{}\": {}", name, e)))?;

    load_from_reader(reader, &name)
}

/// Load image from file bytes; `name` only appears in error messages
pub fn load_image_from_bytes(data: &[u8], name: &str) -> Result<ColorBuffer> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| PaletteError::Decode(format!("Failed to load \"{}\": {}", name, e)))?;

    load_from_reader(reader, name)
}

fn load_from_reader<R: BufRead + Seek>(reader: ImageReader<R>, name: &str) -> Result<ColorBuffer> {
    let image = reader
        .decode()
        .map_err(|e| PaletteError::Decode(format!("Failed to load \"{}\": {}", name, e)))?;

    log::debug!("decoded \"{}\": {:?} {}x{}", name, image.color(), image.width(), image.height());
    Ok(image_to_color_buffer(&image))
}

/// Convert DynamicImage to an RGBA8 color buffer
pub fn image_to_color_buffer(img: &DynamicImage) -> ColorBuffer {
    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8();
    ColorBuffer::from_pixels(
        crate::pixel::interleaved_to_colors(rgba.as_raw()),
        width,
        height,
    )
}
