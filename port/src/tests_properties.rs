//! End-to-end properties of build, quantize, expand and swap working together

use crate::buffer::ColorBuffer;
use crate::color::{Color, ColorKey};
use crate::expand::expand;
use crate::palette::Palette;
use crate::palette_index::PaletteIndex;
use crate::quantize::quantize;

/// Deterministic pseudo-random image with `distinct` opaque colors plus transparent
/// pixels sprinkled in, each color used several times.
fn busy_image(width: u32, height: u32, distinct: u32) -> ColorBuffer {
    let pixels = (0..width * height)
        .map(|i| {
            let h = i.wrapping_mul(2_654_435_761);
            if h % 7 == 0 {
                // transparent with junk RGB
                return Color::new((h >> 8) as u8, (h >> 16) as u8, 3, 0);
            }
            let n = (h >> 4) % distinct;
            Color::new(n as u8, (n >> 8) as u8, 200, 255 - (n % 3) as u8)
        })
        .collect();
    ColorBuffer::from_colors(pixels, width, height).unwrap()
}

fn sequential_colors(count: u32) -> ColorBuffer {
    let pixels = (0..count)
        .map(|n| Color::opaque(n as u8, (n >> 8) as u8, 77))
        .collect();
    ColorBuffer::from_colors(pixels, count, 1).unwrap()
}

#[test]
fn test_roundtrip_reproduces_image() {
    let mut pixels = Vec::new();
    for n in 0..255u32 {
        pixels.push(Color::new(n as u8, 255 - n as u8, (n * 7) as u8, 1 + (n % 255) as u8));
    }
    pixels.push(Color::TRANSPARENT);
    let image = ColorBuffer::from_colors(pixels, 16, 16).unwrap();

    let index = PaletteIndex::from_image(&image);
    let indexed = quantize(&image, &index);
    let back = expand(&indexed, index.palette());
    assert_eq!(back, image);
}

#[test]
fn test_roundtrip_with_repeats() {
    let image = busy_image(37, 23, 120);
    let index = PaletteIndex::from_image(&image);
    let back = expand(&quantize(&image, &index), index.palette());
    // transparent pixels come back as the slot 0 color, everything else exactly
    for (orig, got) in image.pixels().iter().zip(back.pixels()) {
        if orig.is_transparent() {
            assert_eq!(*got, Color::TRANSPARENT);
        } else {
            assert_eq!(got, orig);
        }
    }
}

#[test]
fn test_transparent_pixels_quantize_to_zero() {
    let image = ColorBuffer::from_colors(
        vec![
            Color::new(255, 255, 255, 0),
            Color::opaque(1, 2, 3),
            Color::new(12, 0, 99, 0),
            Color::new(0, 0, 0, 0),
        ],
        2,
        2,
    )
    .unwrap();

    let built = PaletteIndex::from_image(&image);
    let mut explicit = Palette::new();
    explicit.set(0, Color::opaque(9, 9, 9));
    explicit.set(4, Color::TRANSPARENT);
    let supplied = PaletteIndex::from_palette(explicit);

    for index in [&built, &supplied] {
        let out = quantize(&image, index);
        for (i, px) in image.pixels().iter().enumerate() {
            if px.is_transparent() {
                assert_eq!(out.pixels()[i].slot(), 0);
                assert_eq!(out.pixels()[i].to_display()[3], 0);
            }
        }
    }
}

#[test]
fn test_first_occurrence_determinism() {
    let c = Color::new(10, 20, 30, 255);
    let image = ColorBuffer::from_colors(vec![c, c], 2, 1).unwrap();
    let index = PaletteIndex::from_image(&image);

    assert_eq!(index.palette()[1], c);
    let non_sentinel = index
        .palette()
        .iter()
        .filter(|&(slot, color)| slot != 0 && color != Color::TRANSPARENT)
        .count();
    assert_eq!(non_sentinel, 1);
    assert_eq!(quantize(&image, &index).to_slots(), vec![1, 1]);
}

#[test]
fn test_overflow_ceiling() {
    let image = sequential_colors(300);
    let index = PaletteIndex::from_image(&image);
    let report = index.build_report();

    assert_eq!(report.claimed_slots, 255);
    assert_eq!(report.distinct_colors, 300);
    assert_eq!(report.unmapped_colors, 45);
    assert!(report.overflowed());

    // the first 255 colors own slots 1..=255 in order
    for n in 0..255u32 {
        let color = image.pixels()[n as usize];
        assert_eq!(index.lookup_color(color), Some(n as u8 + 1));
    }
    for n in 255..300u32 {
        assert_eq!(index.lookup_color(image.pixels()[n as usize]), None);
    }

    let slots = quantize(&image, &index).to_slots();
    assert!(slots[255..].iter().all(|&s| s == 0));
    assert!(index.is_consistent());
}

#[test]
fn test_swap_canonical_case() {
    let image = sequential_colors(255);
    let mut index = PaletteIndex::from_image(&image);
    let at5 = index.palette()[5];
    let at9 = index.palette()[9];

    index.swap_repair(5, 9);
    assert_eq!(index.lookup(at5.key()), Some(9));
    assert_eq!(index.lookup(at9.key()), Some(5));
    assert_eq!(index.palette()[5], at9);
    assert_eq!(index.palette()[9], at5);
}

#[test]
fn test_swap_duplicate_color_case() {
    let dup = Color::opaque(50, 60, 70);
    let mut palette = Palette::new();
    for slot in 1..=255u8 {
        palette.set(slot, Color::opaque(slot, 0, 0));
    }
    palette.set(3, dup);
    palette.set(7, dup);
    let mut index = PaletteIndex::from_palette(palette);
    assert_eq!(index.lookup(dup.key()), Some(3));
    let at12 = index.palette()[12];

    index.swap_repair(7, 12);
    assert_eq!(index.lookup(dup.key()), Some(3));
    assert_eq!(index.palette()[7], at12);
    assert_eq!(index.palette()[12], dup);
}

#[test]
fn test_swap_noop_every_slot() {
    let image = busy_image(20, 20, 90);
    let mut index = PaletteIndex::from_image(&image);
    let before = index.clone();
    for k in 0..=255u8 {
        index.swap_repair(k, k);
    }
    assert_eq!(index, before);
}

#[test]
fn test_idempotent_rebuild() {
    let image = busy_image(41, 13, 200);
    let first = PaletteIndex::from_image(&image);
    let second = PaletteIndex::from_image(&image);
    assert_eq!(first, second);
    assert_eq!(first.palette(), second.palette());
}

#[test]
fn test_swaps_keep_roundtrip() {
    let image = busy_image(30, 30, 150);
    let mut index = PaletteIndex::from_image(&image);
    for (a, b) in [(1u8, 150u8), (3, 4), (200, 2), (150, 1), (7, 255)] {
        index.swap_repair(a, b);
        assert!(index.is_consistent());
        let back = expand(&quantize(&image, &index), index.palette());
        for (orig, got) in image.pixels().iter().zip(back.pixels()) {
            if !orig.is_transparent() {
                assert_eq!(got, orig);
            }
        }
    }
    assert_eq!(index.lookup(ColorKey::TRANSPARENT), Some(0));
}
