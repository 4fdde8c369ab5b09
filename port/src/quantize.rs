/// Exact-color quantization: full-color raster -> indexed raster
///
/// Every pixel is resolved through the PaletteIndex by its ColorKey. There is no
/// nearest-color search; a color the index has never seen takes the fallback slot chosen
/// by [`UnmappedPolicy`].

use log::warn;

use crate::buffer::{ColorBuffer, IndexBuffer};
use crate::palette_index::PaletteIndex;
use crate::pixel::IndexedPixel;

/// What an unindexed color becomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmappedPolicy {
    /// Slot 0, i.e. the pixel turns transparent in the indexed image.
    #[default]
    Transparent,
    /// A fixed slot.
    Slot(u8),
}

impl UnmappedPolicy {
    #[inline]
    fn slot(self) -> u8 {
        match self {
            UnmappedPolicy::Transparent => 0,
            UnmappedPolicy::Slot(slot) => slot,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuantizeOptions {
    pub unmapped: UnmappedPolicy,
}

/// Indexed image plus how many of its pixels took the fallback slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quantized {
    pub image: IndexBuffer,
    pub unmapped_pixels: usize,
}

/// Quantize with the default options (unmapped colors go to slot 0)
pub fn quantize(image: &ColorBuffer, index: &PaletteIndex) -> IndexBuffer {
    quantize_with_options(image, index, QuantizeOptions::default()).image
}

pub fn quantize_with_options(
    image: &ColorBuffer,
    index: &PaletteIndex,
    options: QuantizeOptions,
) -> Quantized {
    let fallback = options.unmapped.slot();
    let mut unmapped_pixels = 0usize;

    let pixels: Vec<IndexedPixel> = image
        .pixels()
        .iter()
        .map(|&color| match index.lookup_color(color) {
            Some(slot) => IndexedPixel(slot),
            None => {
                unmapped_pixels += 1;
                IndexedPixel(fallback)
            }
        })
        .collect();

    if unmapped_pixels > 0 {
        warn!("{} pixels have no palette slot, mapped to slot {}", unmapped_pixels, fallback);
    }

    let (width, height) = image.dimensions();
    Quantized {
        image: IndexBuffer::from_pixels(pixels, width, height),
        unmapped_pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::palette::Palette;

    #[test]
    fn test_quantize_basic() {
        let image = ColorBuffer::from_colors(
            vec![Color::opaque(10, 20, 30), Color::new(5, 6, 7, 0), Color::opaque(1, 1, 1)],
            3,
            1,
        )
        .unwrap();
        let index = PaletteIndex::from_image(&image);
        let out = quantize(&image, &index);
        assert_eq!(out.dimensions(), (3, 1));
        assert_eq!(out.to_slots(), vec![1, 0, 2]);
        assert_eq!(
            out.to_display_rgba(),
            vec![1, 1, 1, 255, 0, 0, 0, 0, 2, 2, 2, 255]
        );
    }

    #[test]
    fn test_unmapped_defaults_to_transparent() {
        let mut palette = Palette::new();
        palette.set(1, Color::opaque(255, 255, 255));
        let index = PaletteIndex::from_palette(palette);
        let image = ColorBuffer::from_colors(
            vec![Color::opaque(255, 255, 255), Color::opaque(12, 34, 56)],
            2,
            1,
        )
        .unwrap();
        let result = quantize_with_options(&image, &index, QuantizeOptions::default());
        assert_eq!(result.image.to_slots(), vec![1, 0]);
        assert_eq!(result.unmapped_pixels, 1);
    }

    #[test]
    fn test_unmapped_fixed_slot() {
        let index = PaletteIndex::from_palette(Palette::new());
        let image = ColorBuffer::from_colors(vec![Color::opaque(12, 34, 56)], 1, 1).unwrap();
        let options = QuantizeOptions { unmapped: UnmappedPolicy::Slot(17) };
        let result = quantize_with_options(&image, &index, options);
        assert_eq!(result.image.to_slots(), vec![17]);
        assert_eq!(result.image.to_display_rgba(), vec![17, 17, 17, 255]);
    }

    #[test]
    fn test_quantize_does_not_mutate_input() {
        let image = ColorBuffer::from_colors(vec![Color::opaque(3, 3, 3); 4], 2, 2).unwrap();
        let copy = image.clone();
        let index = PaletteIndex::from_image(&image);
        let _ = quantize(&image, &index);
        assert_eq!(image, copy);
    }
}
