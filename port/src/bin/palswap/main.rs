//! Palswap - palette indexing CLI
//!
//! Pipeline: input PNG -> palette (supplied 256x1 strip, or built from the input) ->
//! indexed/color pair -> optional slot swaps -> outputs
//!
//! Swaps are applied in command-line order with the same repair logic the interactive
//! editor uses, so a scripted run reproduces a drag session exactly.

mod args;

use args::*;
use clap::Parser;
use env_logger::Env;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use palswap::decode::load_image_from_path;
use palswap::output::{encode_display_png, encode_palette_png, encode_palettized_png, encode_rgba_png};
use palswap::{ImageKind, LoadRequest, Palette, QuantizeOptions, Workspace};

fn write_file(path: &PathBuf, bytes: &[u8]) -> Result<(), String> {
    fs::write(path, bytes).map_err(|e| format!("Failed to save {}: {}", path.display(), e))?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn write_metadata(path: &PathBuf, args: &Args, workspace: &Workspace) -> Result<(), String> {
    let (width, height) = workspace.dimensions();
    let report = workspace.build_report();
    let palette: Vec<String> = workspace.palette().colors().iter().map(|c| c.to_string()).collect();
    let swaps: Vec<[u8; 2]> = args.swaps.iter().map(|&(a, b)| [a, b]).collect();

    let meta = json!({
        "input": args.input.display().to_string(),
        "kind": match workspace.source() {
            ImageKind::Color => "color",
            ImageKind::Indexed => "indexed",
        },
        "width": width,
        "height": height,
        "palette_supplied": args.palette.is_some(),
        "claimed_slots": report.claimed_slots,
        "distinct_colors": report.distinct_colors,
        "unmapped_colors": report.unmapped_colors,
        "unmapped_pixels": workspace.unmapped_pixels(),
        "swaps": swaps,
        "palette": palette,
    });

    let text = serde_json::to_string_pretty(&meta)
        .map_err(|e| format!("Failed to serialize metadata: {}", e))?;
    write_file(path, text.as_bytes())
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if !args.has_output() {
        return Err(
            "No output specified. Use --output-color, --output-indexed, --output-png8, --output-palette, or --output-meta"
                .to_string(),
        );
    }

    let kind = args.kind.to_image_kind();

    log::info!("loading {}", args.input.display());
    let image = load_image_from_path(&args.input).map_err(|e| e.to_string())?;

    let palette = match args.palette {
        Some(ref path) => {
            let strip = load_image_from_path(path).map_err(|e| e.to_string())?;
            let palette = Palette::from_image(&strip)
                .map_err(|e| format!("{}: {}", path.display(), e))?;
            log::info!("loaded palette from {}", path.display());
            Some(palette)
        }
        None => None,
    };

    let mut workspace = Workspace::with_options(QuantizeOptions { unmapped: args.unmapped_policy() });
    workspace
        .load(LoadRequest { kind, image, palette })
        .map_err(|e| e.to_string())?;

    let report = workspace.build_report();
    if report.overflowed() {
        eprintln!(
            "Warning: {} distinct colors, only 255 fit in the palette; {} colors fall back to slot {}",
            report.distinct_colors,
            report.unmapped_colors,
            args.unmapped_slot.unwrap_or(0)
        );
    }

    for &(a, b) in &args.swaps {
        workspace.swap(a, b);
    }

    if let Some(ref path) = args.output_color {
        write_file(path, &encode_rgba_png(workspace.color_image()).map_err(|e| e.to_string())?)?;
    }
    if let Some(ref path) = args.output_indexed {
        write_file(path, &encode_display_png(workspace.indexed_image()).map_err(|e| e.to_string())?)?;
    }
    if let Some(ref path) = args.output_png8 {
        let bytes = encode_palettized_png(workspace.indexed_image(), workspace.palette())
            .map_err(|e| e.to_string())?;
        write_file(path, &bytes)?;
    }
    if let Some(ref path) = args.output_palette {
        write_file(path, &encode_palette_png(workspace.palette()).map_err(|e| e.to_string())?)?;
    }
    if let Some(ref path) = args.output_meta {
        write_metadata(path, &args, &workspace)?;
    }

    Ok(())
}
