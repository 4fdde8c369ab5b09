//! Staging area for decoded files before they are loaded into a [`Workspace`].
//!
//! Files arrive one at a time and in any order. A 256x1 image is taken as the palette,
//! anything else as the main image, whose kind (color or indexed) must then be chosen
//! before a load can happen. A failed decode is kept as a message and reported first.

use crate::buffer::ColorBuffer;
use crate::decode::load_image_from_bytes;
use crate::error::{PaletteError, Result};
use crate::palette::{is_palette_shape, Palette};
use crate::workspace::{ImageKind, LoadRequest, Workspace};

/// Where a staged file went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Staged {
    Palette,
    Image,
}

#[derive(Clone, Debug, Default)]
pub struct PendingInputs {
    image: Option<ColorBuffer>,
    kind: Option<ImageKind>,
    palette: Option<Palette>,
    error: Option<PaletteError>,
}

impl PendingInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the outcome of decoding one file.
    pub fn stage(&mut self, decoded: Result<ColorBuffer>) -> Option<Staged> {
        let image = match decoded {
            Ok(image) => image,
            Err(e) => {
                self.error = Some(e);
                return None;
            }
        };
        self.error = None;

        let (width, height) = image.dimensions();
        if is_palette_shape(width, height) {
            // shape already checked
            self.palette = Palette::from_image(&image).ok();
            Some(Staged::Palette)
        } else {
            self.image = Some(image);
            self.kind = None;
            Some(Staged::Image)
        }
    }

    /// Decode and stage a dropped file. Files without a `.png` extension are skipped.
    pub fn stage_file(&mut self, name: &str, bytes: &[u8]) -> Option<Staged> {
        if !name.to_ascii_lowercase().ends_with(".png") {
            log::debug!("skipping non-PNG file \"{}\"", name);
            return None;
        }
        self.stage(load_image_from_bytes(bytes, name))
    }

    pub fn set_kind(&mut self, kind: ImageKind) {
        self.kind = Some(kind);
    }

    /// An image is staged but nobody has said whether it is color or indexed yet.
    #[inline]
    pub fn needs_kind(&self) -> bool {
        self.image.is_some() && self.kind.is_none()
    }

    #[inline]
    pub fn has_palette(&self) -> bool {
        self.palette.is_some()
    }

    /// The single problem blocking a load, most important first.
    pub fn resolve_error(&self) -> Option<PaletteError> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        if self.image.is_none() {
            return Some(PaletteError::MissingImage);
        }
        if self.kind == Some(ImageKind::Indexed) && self.palette.is_none() {
            return Some(PaletteError::MissingPalette);
        }
        None
    }

    /// Load into `workspace` if everything needed is staged.
    ///
    /// Returns `Ok(false)` while the image kind is still undecided. After a successful
    /// load the staged palette is consumed; the staged image stays for a later reload.
    pub fn try_load(&mut self, workspace: &mut Workspace) -> Result<bool> {
        if let Some(error) = self.resolve_error() {
            return Err(error);
        }
        let (Some(kind), Some(image)) = (self.kind, self.image.as_ref()) else {
            return Ok(false);
        };

        workspace.load(LoadRequest {
            kind,
            image: image.clone(),
            palette: self.palette.clone(),
        })?;
        self.palette = None;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn image_2x2() -> ColorBuffer {
        ColorBuffer::from_colors(vec![Color::opaque(1, 1, 1); 4], 2, 2).unwrap()
    }

    #[test]
    fn test_missing_image_first() {
        let pending = PendingInputs::new();
        assert_eq!(pending.resolve_error(), Some(PaletteError::MissingImage));
    }

    #[test]
    fn test_palette_classified_by_shape() {
        let mut pending = PendingInputs::new();
        assert_eq!(pending.stage(Ok(ColorBuffer::blank(256, 1))), Some(Staged::Palette));
        assert!(pending.has_palette());
        assert_eq!(pending.stage(Ok(ColorBuffer::blank(1, 256))), Some(Staged::Image));
        assert!(pending.needs_kind());
    }

    #[test]
    fn test_indexed_needs_palette() {
        let mut pending = PendingInputs::new();
        pending.stage(Ok(image_2x2()));
        pending.set_kind(ImageKind::Indexed);
        assert_eq!(pending.resolve_error(), Some(PaletteError::MissingPalette));
        pending.set_kind(ImageKind::Color);
        assert_eq!(pending.resolve_error(), None);
    }

    #[test]
    fn test_decode_error_reported_and_cleared() {
        let mut pending = PendingInputs::new();
        pending.stage(Ok(image_2x2()));
        pending.stage(Err(PaletteError::Decode("Failed to load \"x.png\"".into())));
        assert!(matches!(pending.resolve_error(), Some(PaletteError::Decode(_))));
        pending.stage(Ok(ColorBuffer::blank(256, 1)));
        assert_eq!(pending.resolve_error(), None);
    }

    #[test]
    fn test_try_load_waits_for_kind_then_consumes_palette() {
        let mut pending = PendingInputs::new();
        let mut ws = Workspace::new();
        pending.stage(Ok(image_2x2()));
        assert_eq!(pending.try_load(&mut ws), Ok(false));
        assert!(!ws.is_loaded());

        let mut strip = ColorBuffer::blank(256, 1);
        strip.pixels_mut()[5] = Color::opaque(1, 1, 1);
        pending.stage(Ok(strip));
        pending.set_kind(ImageKind::Color);
        assert_eq!(pending.try_load(&mut ws), Ok(true));
        assert_eq!(ws.indexed_image().to_slots(), vec![5; 4]);
        assert!(!pending.has_palette());

        // reload builds from the image now that the palette is gone
        assert_eq!(pending.try_load(&mut ws), Ok(true));
        assert_eq!(ws.indexed_image().to_slots(), vec![1; 4]);
    }

    #[test]
    fn test_stage_file_skips_other_extensions() {
        let mut pending = PendingInputs::new();
        assert_eq!(pending.stage_file("notes.txt", b"hello"), None);
        assert_eq!(pending.resolve_error(), Some(PaletteError::MissingImage));
        assert_eq!(pending.stage_file("bad.PNG", b"hello"), None);
        assert!(matches!(pending.resolve_error(), Some(PaletteError::Decode(_))));
    }
}
