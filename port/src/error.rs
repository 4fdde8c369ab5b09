//! Error type shared by the buffer constructors, the loaders and the encoders.
//!
//! The palette operations themselves (build, lookup, quantize, expand, swap) never fail;
//! everything here comes from the edges where raw bytes enter or leave the crate.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// A supplied palette image is not exactly 1x256.
    #[error("not a palette: expected a 256x1 image, got {width}x{height}")]
    InputShape { width: u32, height: u32 },
    /// Raw pixel data does not match the declared dimensions.
    #[error("data length {actual} doesn't match expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("Missing image file")]
    MissingImage,
    #[error("Missing palette file")]
    MissingPalette,
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
