//! Command-line argument definitions and type conversions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use palswap::{ImageKind, UnmappedPolicy};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum Kind {
    /// Full-color image; the indexed image is derived from it
    #[default]
    Color,
    /// Gray-coded indexed image (slot in the gray level); requires --palette
    Indexed,
}

impl Kind {
    pub fn to_image_kind(self) -> ImageKind {
        match self {
            Kind::Color => ImageKind::Color,
            Kind::Indexed => ImageKind::Indexed,
        }
    }
}

/// Parse `A:B` into a pair of palette slots
pub fn parse_swap(s: &str) -> Result<(u8, u8), String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid swap '{}': expected A:B", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u8>()
            .map_err(|_| format!("Invalid slot '{}' in swap '{}': must be 0-255", v, s))
    };
    Ok((parse(a)?, parse(b)?))
}

#[derive(Parser, Debug)]
#[command(name = "palswap")]
#[command(author, version, about = "Palswap - exact-color palette indexing and slot swapping", long_about = None)]
pub struct Args {
    /// Input image path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Palette image path (must be exactly 256x1). Without it the palette is built from
    /// the input's colors in raster order
    #[arg(short, long)]
    pub palette: Option<PathBuf>,

    /// What the input image holds
    #[arg(short, long, value_enum, default_value_t = Kind::Color)]
    pub kind: Kind,

    /// Swap two palette slots, e.g. --swap 5:9 (repeatable, applied in order)
    #[arg(long = "swap", value_parser = parse_swap)]
    pub swaps: Vec<(u8, u8)>,

    /// Slot given to colors the palette does not contain (default: 0, transparent)
    #[arg(long)]
    pub unmapped_slot: Option<u8>,

    /// Output color PNG path
    #[arg(long)]
    pub output_color: Option<PathBuf>,

    /// Output gray-coded indexed PNG path (slot as gray level, slot 0 transparent)
    #[arg(long)]
    pub output_indexed: Option<PathBuf>,

    /// Output palettized PNG path (8-bit indices with PLTE/tRNS)
    #[arg(long)]
    pub output_png8: Option<PathBuf>,

    /// Output 256x1 palette PNG path
    #[arg(long)]
    pub output_palette: Option<PathBuf>,

    /// Output metadata JSON file path
    #[arg(long)]
    pub output_meta: Option<PathBuf>,

    /// Enable verbose output (debug-level logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn unmapped_policy(&self) -> UnmappedPolicy {
        match self.unmapped_slot {
            None | Some(0) => UnmappedPolicy::Transparent,
            Some(slot) => UnmappedPolicy::Slot(slot),
        }
    }

    pub fn has_output(&self) -> bool {
        self.output_color.is_some()
            || self.output_indexed.is_some()
            || self.output_png8.is_some()
            || self.output_palette.is_some()
            || self.output_meta.is_some()
    }
}
