//! Color-to-slot lookup table paired with the palette it indexes.
//!
//! The table is built with first-occurrence-wins semantics: the first slot (or the first
//! pixel, in raster order) that shows a given [`ColorKey`] owns it, and later repeats
//! resolve to that owner. The transparent key is pre-claimed by slot 0.
//!
//! After a build, the only mutation is [`PaletteIndex::swap_repair`], which exchanges two
//! slots and moves table ownership in O(1) instead of rebuilding.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::buffer::ColorBuffer;
use crate::color::{Color, ColorKey};
use crate::palette::{Palette, PALETTE_SIZE};

/// Highest slot a source-image build may claim.
const LAST_SLOT: u8 = (PALETTE_SIZE - 1) as u8;

/// Statistics from the last build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Non-sentinel slots claimed by distinct colors (source-image builds only).
    pub claimed_slots: usize,
    /// Distinct non-transparent keys encountered.
    pub distinct_colors: usize,
    /// Distinct non-transparent keys that found no free slot.
    pub unmapped_colors: usize,
}

impl BuildReport {
    /// True when the source had more distinct colors than the palette can hold.
    #[inline]
    pub fn overflowed(&self) -> bool {
        self.unmapped_colors > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteIndex {
    table: HashMap<ColorKey, u8>,
    palette: Palette,
    report: BuildReport,
}

impl Default for PaletteIndex {
    fn default() -> Self {
        Self::from_palette(Palette::new())
    }
}

impl PaletteIndex {
    /// Index an explicit palette.
    ///
    /// Slots are scanned 0..=255; a key repeated across slots belongs to its lowest slot.
    /// The transparent key is seeded to slot 0 before the scan, so transparent pixels
    /// always resolve to slot 0 after a build even when the supplied palette keeps its
    /// transparent entry elsewhere.
    pub fn from_palette(palette: Palette) -> Self {
        let mut table = HashMap::with_capacity(PALETTE_SIZE);
        table.insert(ColorKey::TRANSPARENT, 0);

        for (slot, color) in palette.iter() {
            table.entry(color.key()).or_insert(slot);
        }

        let report = BuildReport {
            claimed_slots: 0,
            distinct_colors: table.keys().filter(|k| !k.is_transparent()).count(),
            unmapped_colors: 0,
        };
        debug!("indexed explicit palette: {} distinct colors", report.distinct_colors);

        Self { table, palette, report }
    }

    /// Build palette and table from a color image scanned in raster order.
    ///
    /// Each new non-transparent key claims the next free slot starting at 1 and its color
    /// is written into that slot. Once slot 255 is taken, further new keys stay unmapped;
    /// that is reported (and logged) but never fails the build.
    pub fn from_image(image: &ColorBuffer) -> Self {
        let mut table = HashMap::new();
        table.insert(ColorKey::TRANSPARENT, 0);
        let mut palette = Palette::new();
        let mut claimed: u8 = 0;
        let mut unmapped: HashSet<ColorKey> = HashSet::new();

        for &color in image.pixels() {
            let key = color.key();
            if key.is_transparent() || table.contains_key(&key) {
                continue;
            }
            if claimed == LAST_SLOT {
                unmapped.insert(key);
                continue;
            }
            claimed += 1;
            table.insert(key, claimed);
            palette.set(claimed, color);
        }

        let report = BuildReport {
            claimed_slots: claimed as usize,
            distinct_colors: claimed as usize + unmapped.len(),
            unmapped_colors: unmapped.len(),
        };

        let (w, h) = image.dimensions();
        if report.overflowed() {
            warn!(
                "{}x{} image has {} distinct colors; {} could not be assigned a slot and will fall back",
                w, h, report.distinct_colors, report.unmapped_colors
            );
        } else {
            debug!("built palette from {}x{} image: {} slots claimed", w, h, report.claimed_slots);
        }

        Self { table, palette, report }
    }

    /// Slot owning `key`, or `None` when the key was never indexed.
    #[inline]
    pub fn lookup(&self, key: ColorKey) -> Option<u8> {
        self.table.get(&key).copied()
    }

    #[inline]
    pub fn lookup_color(&self, color: Color) -> Option<u8> {
        self.lookup(color.key())
    }

    /// Exchange slots `a` and `b` and move table ownership with them.
    ///
    /// A key is redirected only if it currently points at the slot being vacated. A slot
    /// holding a duplicate color does not own its key, so moving it leaves the owner's
    /// entry untouched. When both slots carry the same key the table is left as is.
    pub fn swap_repair(&mut self, a: u8, b: u8) {
        if a == b {
            return;
        }

        let key_a = self.palette[a].key();
        let key_b = self.palette[b].key();

        if key_a != key_b {
            let a_owns = self.table.get(&key_a) == Some(&a);
            let b_owns = self.table.get(&key_b) == Some(&b);
            if a_owns {
                self.table.insert(key_a, b);
            }
            if b_owns {
                self.table.insert(key_b, a);
            }
        }

        self.palette.swap(a, b);
        debug!("swapped palette slots {} and {}", a, b);
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn build_report(&self) -> BuildReport {
        self.report
    }

    /// Number of keys in the table, the transparent key included.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Every table entry points at a slot holding its color, and every palette color is
    /// indexed. The transparent key is exempt from the first check since it is seeded
    /// to slot 0 whatever that slot holds.
    pub fn is_consistent(&self) -> bool {
        let owners_match = self
            .table
            .iter()
            .all(|(&key, &slot)| key.is_transparent() || self.palette[slot].key() == key);
        let all_indexed = self
            .palette
            .iter()
            .all(|(_, c)| self.table.contains_key(&c.key()));
        owners_match && all_indexed
    }
}
