/// Palswap - indexed-color palette engine (Rust/WASM)
///
/// Builds a bidirectional mapping between RGBA colors and the 256 slots of a palette,
/// converts color images to gray-coded indexed images and back, and keeps the mapping
/// consistent while palette slots are swapped interactively.
///
/// The browser front end drives a single `PaletteEditor` handle; pixel data crosses the
/// WASM boundary only when a canvas needs repainting.

use wasm_bindgen::prelude::*;
use js_sys::Uint8ClampedArray;

pub mod buffer;
pub mod color;
pub mod decode;
pub mod editor;
pub mod error;
pub mod expand;
pub mod input;
pub mod output;
pub mod palette;
pub mod palette_index;
pub mod pixel;
pub mod quantize;
pub mod workspace;

#[cfg(test)]
mod tests_properties;

pub use buffer::{ColorBuffer, IndexBuffer};
pub use color::{Color, ColorKey};
pub use error::PaletteError;
pub use palette::{Palette, PALETTE_SIZE};
pub use palette_index::{BuildReport, PaletteIndex};
pub use pixel::IndexedPixel;
pub use quantize::{QuantizeOptions, UnmappedPolicy};
pub use workspace::{ImageKind, LoadRequest, Workspace};

use editor::PaletteDrag;
use input::{PendingInputs, Staged};

fn to_js(e: PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn kind_from_indexed(indexed: bool) -> ImageKind {
    if indexed {
        ImageKind::Indexed
    } else {
        ImageKind::Color
    }
}

/// Packed lookup key of a color (0 for any fully transparent color)
#[wasm_bindgen]
pub fn color_key(r: u8, g: u8, b: u8, a: u8) -> u32 {
    Color::new(r, g, b, a).key().value()
}

// ============================================================================
// PaletteEditor - opaque session handle
// ============================================================================

/// One editing session: staged files, the workspace, and the palette drag gesture.
#[wasm_bindgen]
pub struct PaletteEditor {
    workspace: Workspace,
    pending: PendingInputs,
    drag: PaletteDrag,
}

impl Default for PaletteEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PaletteEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PaletteEditor {
        PaletteEditor {
            workspace: Workspace::new(),
            pending: PendingInputs::new(),
            drag: PaletteDrag::new(),
        }
    }

    // ========================================================================
    // File staging
    // ========================================================================

    /// Decode and stage a dropped file.
    /// Returns "palette", "image", or "" when the file was skipped or failed to decode
    /// (the failure is reported by `try_load`).
    #[wasm_bindgen]
    pub fn add_file(&mut self, name: &str, bytes: Vec<u8>) -> String {
        match self.pending.stage_file(name, &bytes) {
            Some(Staged::Palette) => "palette".to_string(),
            Some(Staged::Image) => "image".to_string(),
            None => String::new(),
        }
    }

    /// True when an image is staged and the user still has to pick color or indexed
    #[wasm_bindgen(getter)]
    pub fn needs_image_kind(&self) -> bool {
        self.pending.needs_kind()
    }

    #[wasm_bindgen]
    pub fn set_image_kind(&mut self, indexed: bool) {
        self.pending.set_kind(kind_from_indexed(indexed));
    }

    /// Load the staged files if possible.
    /// Returns the message to show the user, or "" when there is nothing to report.
    #[wasm_bindgen]
    pub fn try_load(&mut self) -> String {
        match self.pending.try_load(&mut self.workspace) {
            Ok(_) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    // ========================================================================
    // Direct loads (canvas-extracted RGBA data)
    // ========================================================================

    /// Load a color image; `palette` is 1024 RGBA bytes or omitted to build one
    #[wasm_bindgen]
    pub fn load_rgba(
        &mut self,
        data: Vec<u8>,
        width: u32,
        height: u32,
        indexed: bool,
        palette: Option<Vec<u8>>,
    ) -> Result<(), JsValue> {
        let image = ColorBuffer::from_rgba(&data, width, height).map_err(to_js)?;
        let palette = palette
            .map(|p| Palette::from_rgba_bytes(&p))
            .transpose()
            .map_err(to_js)?;
        self.workspace
            .load(LoadRequest { kind: kind_from_indexed(indexed), image, palette })
            .map_err(to_js)
    }

    // ========================================================================
    // Editing
    // ========================================================================

    #[wasm_bindgen]
    pub fn swap(&mut self, a: u8, b: u8) {
        self.workspace.swap(a, b);
    }

    /// Pointer pressed on the palette strip. `button` follows MouseEvent.button.
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, button: i16, x: f64, strip_width: f64) {
        self.drag.press(button == 0, x, strip_width);
    }

    /// Pointer moved anywhere on the page. Returns true when the canvases need repainting.
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f64, strip_width: f64) -> bool {
        self.drag.drag(&mut self.workspace, x, strip_width).is_some()
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    // ========================================================================
    // Output for canvases
    // ========================================================================

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.workspace.dimensions().0
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.workspace.dimensions().1
    }

    #[wasm_bindgen(getter)]
    pub fn loaded(&self) -> bool {
        self.workspace.is_loaded()
    }

    /// Distinct colors that did not fit in the palette during the last build
    #[wasm_bindgen(getter)]
    pub fn unmapped_colors(&self) -> u32 {
        self.workspace.build_report().unmapped_colors as u32
    }

    #[wasm_bindgen]
    pub fn color_rgba(&self) -> Uint8ClampedArray {
        Uint8ClampedArray::from(self.workspace.color_image().to_rgba().as_slice())
    }

    /// Gray display form of the indexed image
    #[wasm_bindgen]
    pub fn indexed_rgba(&self) -> Uint8ClampedArray {
        Uint8ClampedArray::from(self.workspace.indexed_image().to_display_rgba().as_slice())
    }

    /// 256x1 palette strip
    #[wasm_bindgen]
    pub fn palette_rgba(&self) -> Uint8ClampedArray {
        Uint8ClampedArray::from(self.workspace.palette().to_rgba_bytes().as_slice())
    }

    /// Indexed image as a palettized PNG file
    #[wasm_bindgen]
    pub fn export_indexed_png(&self) -> Result<Vec<u8>, JsValue> {
        output::encode_palettized_png(self.workspace.indexed_image(), self.workspace.palette())
            .map_err(to_js)
    }
}
