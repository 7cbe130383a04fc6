//! Pointer input as delivered by the widget layer.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Where a pointer event came from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerSource {
    #[default]
    Mouse,
    /// A mouse event the toolkit synthesized from touch input.
    SynthesizedTouch,
}

bitflags! {
    /// Pointer buttons held during a motion event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Buttons: u8 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::PRIMARY
    }
}
