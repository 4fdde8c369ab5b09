/// Pointer-drag gesture over the 256-slot palette strip
///
/// Pressing grabs the slot under the pointer. Every move that lands on a different slot
/// swaps the grabbed slot with it, so the grabbed color travels along the strip and the
/// workspace re-derives its image after each step. Releasing ends the gesture.

use crate::palette::PALETTE_SIZE;
use crate::workspace::Workspace;

/// Slot under a pointer at `x` on a strip `strip_width` wide (both in the same units).
///
/// Positions outside the strip clamp to the first or last slot.
pub fn slot_at(x: f64, strip_width: f64) -> u8 {
    if !(strip_width > 0.0) || !x.is_finite() {
        return 0;
    }
    let slot = (x * PALETTE_SIZE as f64 / strip_width).floor();
    slot.clamp(0.0, (PALETTE_SIZE - 1) as f64) as u8
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteDrag {
    grabbed: Option<u8>,
}

impl PaletteDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag. Only the primary button grabs; returns the grabbed slot.
    pub fn press(&mut self, primary: bool, x: f64, strip_width: f64) -> Option<u8> {
        if !primary {
            return None;
        }
        let slot = slot_at(x, strip_width);
        self.grabbed = Some(slot);
        Some(slot)
    }

    /// Follow the pointer, swapping through `workspace`. Returns the swapped pair, if any.
    pub fn drag(&mut self, workspace: &mut Workspace, x: f64, strip_width: f64) -> Option<(u8, u8)> {
        let from = self.grabbed?;
        let to = slot_at(x, strip_width);
        if from == to {
            return None;
        }
        workspace.swap(from, to);
        self.grabbed = Some(to);
        Some((from, to))
    }

    pub fn release(&mut self) {
        self.grabbed = None;
    }

    #[inline]
    pub fn grabbed(&self) -> Option<u8> {
        self.grabbed
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.grabbed.is_some()
    }
}
