//! The editing session: one palette index plus the color and indexed images derived
//! through it.
//!
//! One of the two images is the source of truth (whichever was loaded), the other is
//! derived. A load rebuilds everything; a slot swap repairs the index and re-derives
//! only the non-source image. The index, the palette and both buffers are owned here
//! and mutated together, so no caller can observe them out of step.

use log::debug;

use crate::buffer::{ColorBuffer, IndexBuffer};
use crate::error::{PaletteError, Result};
use crate::expand::{expand, expand_into};
use crate::palette::Palette;
use crate::palette_index::{BuildReport, PaletteIndex};
use crate::quantize::{quantize_with_options, QuantizeOptions};

/// Which image a load supplies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageKind {
    /// A full-color image; the indexed image is derived from it.
    #[default]
    Color,
    /// A gray-coded indexed image (slot in the red channel); the color image is derived.
    Indexed,
}

/// Decoded inputs for one load.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub kind: ImageKind,
    pub image: ColorBuffer,
    /// Supplied palette. Without one, the palette is built from a color image; an
    /// indexed image cannot be loaded without one.
    pub palette: Option<Palette>,
}

#[derive(Clone, Debug, Default)]
pub struct Workspace {
    index: PaletteIndex,
    color: ColorBuffer,
    indexed: IndexBuffer,
    source: ImageKind,
    options: QuantizeOptions,
    unmapped_pixels: usize,
    loaded: bool,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: QuantizeOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Replace the whole session.
    ///
    /// Nothing is modified unless the load succeeds.
    pub fn load(&mut self, request: LoadRequest) -> Result<()> {
        let LoadRequest { kind, image, palette } = request;

        let index = match (palette, kind) {
            (Some(palette), _) => PaletteIndex::from_palette(palette),
            (None, ImageKind::Color) => PaletteIndex::from_image(&image),
            (None, ImageKind::Indexed) => return Err(PaletteError::MissingPalette),
        };

        let (color, indexed, unmapped_pixels) = match kind {
            ImageKind::Color => {
                let quantized = quantize_with_options(&image, &index, self.options);
                (image, quantized.image, quantized.unmapped_pixels)
            }
            ImageKind::Indexed => {
                let indexed = IndexBuffer::from_display_image(&image);
                let color = expand(&indexed, index.palette());
                (color, indexed, 0)
            }
        };

        debug!("loaded {:?} image {}x{}", kind, color.width(), color.height());

        self.index = index;
        self.color = color;
        self.indexed = indexed;
        self.source = kind;
        self.unmapped_pixels = unmapped_pixels;
        self.loaded = true;
        Ok(())
    }

    /// Swap two palette slots and re-derive the non-source image.
    pub fn swap(&mut self, a: u8, b: u8) {
        if a == b {
            return;
        }
        self.index.swap_repair(a, b);
        self.render_derived();
    }

    fn render_derived(&mut self) {
        match self.source {
            ImageKind::Color => {
                let quantized = quantize_with_options(&self.color, &self.index, self.options);
                self.indexed = quantized.image;
                self.unmapped_pixels = quantized.unmapped_pixels;
            }
            ImageKind::Indexed => {
                expand_into(&self.indexed, self.index.palette(), &mut self.color);
            }
        }
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[inline]
    pub fn source(&self) -> ImageKind {
        self.source
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.color.dimensions()
    }

    #[inline]
    pub fn index(&self) -> &PaletteIndex {
        &self.index
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        self.index.palette()
    }

    #[inline]
    pub fn color_image(&self) -> &ColorBuffer {
        &self.color
    }

    #[inline]
    pub fn indexed_image(&self) -> &IndexBuffer {
        &self.indexed
    }

    #[inline]
    pub fn build_report(&self) -> BuildReport {
        self.index.build_report()
    }

    /// Pixels of the color image that took the fallback slot in the last quantize pass.
    #[inline]
    pub fn unmapped_pixels(&self) -> usize {
        self.unmapped_pixels
    }

    #[inline]
    pub fn options(&self) -> QuantizeOptions {
        self.options
    }
}
