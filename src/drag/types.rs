//! Data types for drag gestures on dock items.

use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::animation::PointAnimation;
use crate::geometry::{DockRegion, Rectangle};
use crate::input::{Buttons, PointerSource};
use crate::intent::ItemId;
use crate::timer::Timer;

/// Thresholds and durations for drag gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOptions {
    /// Manhattan distance after which a press turns into a drag.
    pub start_threshold: f64,
    /// Removal distance as a multiple of the dock thickness.
    pub distance_multiple: f64,
    pub go_back_duration: Duration,
    pub remove_animation_duration: Duration,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self::from(&dock_interact_config::Drag::default())
    }
}

impl From<&dock_interact_config::Drag> for DragOptions {
    fn from(config: &dock_interact_config::Drag) -> Self {
        Self {
            start_threshold: config.start_threshold.0,
            distance_multiple: config.distance_multiple.0,
            go_back_duration: Duration::from_millis(u64::from(config.go_back_duration_ms)),
            remove_animation_duration: Duration::from_millis(u64::from(
                config.remove_animation_duration_ms,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    TrayIcon,
    /// An application pinned to the dock.
    DockedApp,
    RunningApp,
}

/// One slot of the reorderable list, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragItem {
    pub id: ItemId,
    pub rect: Rectangle,
    pub kind: ItemKind,
    /// Whether dragging the item off the dock removes it.
    #[serde(default)]
    pub removable: bool,
}

/// State of an ongoing drag, owned by the coordinator for the duration of one gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub item: ItemId,
    pub kind: ItemKind,
    pub removable: bool,
    pub origin: DVec2,
    pub current: DVec2,
    /// Dock geometry captured when the drag started.
    pub dock: DockRegion,
    /// Distance past the dock edge beyond which a drop removes the item.
    pub distance_threshold: f64,
    pub remove_able: bool,
}

impl DragSession {
    /// Whether releasing at `pos` removes the item.
    pub fn is_remove_able_at(&self, pos: DVec2) -> bool {
        self.removable && self.dock.outward_distance(pos) > self.distance_threshold
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    /// Button is down on an item but the pointer has not moved far enough yet.
    Pressed {
        item: ItemId,
        origin: DVec2,
    },
    Dragging(DragSession),
    /// The gesture finished; the outcome waits for the caller to take it.
    Finished(DragOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancelReason {
    /// Cancelled by the user, e.g. with Escape.
    Cancelled,
    /// The drop target refused the item, or it was released outside any slot.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum DragOutcome {
    Dropped { item: ItemId, index: usize },
    Cancelled { item: ItemId, reason: CancelReason },
    RemoveRequested { item: ItemId },
}

impl DragOutcome {
    pub fn item(&self) -> &ItemId {
        match self {
            DragOutcome::Dropped { item, .. }
            | DragOutcome::Cancelled { item, .. }
            | DragOutcome::RemoveRequested { item } => item,
        }
    }
}

/// Item removal waiting for its animation to finish.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingRemoval {
    pub(crate) item: ItemId,
    pub(crate) timer: Timer,
}

/// A cancelled item travelling back to where the gesture started.
#[derive(Debug, Clone, PartialEq)]
pub struct GoBack {
    pub item: ItemId,
    pub anim: PointAnimation,
}

/// Drag input as a plain data message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DragEvent {
    SetDock {
        dock: DockRegion,
    },
    SetItems {
        items: Vec<DragItem>,
    },
    PointerDown {
        item: ItemId,
        pos: DVec2,
    },
    PointerMove {
        pos: DVec2,
        #[serde(default)]
        source: PointerSource,
        #[serde(default)]
        buttons: Buttons,
    },
    PointerUp {
        pos: DVec2,
    },
    /// Out-of-band confirmation that a touch press was held long enough to start a drag.
    ConfirmTouchDragPress,
    Cancel,
    Reject,
    /// The caller consumed the terminal outcome.
    TakeOutcome,
}
