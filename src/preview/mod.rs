//! Window-preview popup for a taskbar group.
//!
//! [`PreviewCoordinator`] consumes hover, leave and click events over the thumbnail strip, plus
//! periodic window-list snapshots, and decides when the floating preview shows, which window it
//! tracks, and when the popup goes away.
//!
//! Two single-shot timers smooth out pointer movement:
//!
//! - the show delay keeps the floating preview hidden while the pointer sweeps across
//!   thumbnails right after entering the strip; once it elapses the last hovered window wins;
//! - the leave delay gives the pointer time to travel between the strip and the floating preview
//!   without the popup closing under it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::geometry::DockPosition;
use crate::intent::{Intent, IntentQueue, WindowId};
use crate::timer::Timer;

mod window_set;

pub use window_set::{LayoutDirection, PreviewSet, SetChanges, WindowInfo};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    pub show_delay: Duration,
    pub leave_delay: Duration,
    /// Without a compositor there are no floating previews, only the window list.
    pub composited: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self::from(&dock_interact_config::Preview::default())
    }
}

impl From<&dock_interact_config::Preview> for PreviewOptions {
    fn from(config: &dock_interact_config::Preview) -> Self {
        Self {
            show_delay: Duration::from_millis(u64::from(config.show_delay_ms)),
            leave_delay: Duration::from_millis(u64::from(config.leave_delay_ms)),
            composited: config.composited,
        }
    }
}

/// Why the popup should not be cancelled when the pointer leaves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PendingActivation {
    #[default]
    None,
    /// A thumbnail was clicked and its window already activated.
    Clicked,
    /// A drag left the strip; the tracked window activates once the pointer is gone.
    DragLeft,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HoverState {
    /// Last hovered thumbnail, the one the floating preview follows.
    pub tracked: Option<WindowId>,
    /// Window the floating preview currently shows.
    pub previewed: Option<WindowId>,
    pub activation: PendingActivation,
    /// Whether the pointer is over the strip or the floating preview.
    pub pointer_inside: bool,
}

/// Preview input as a plain data message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PreviewEvent {
    SetWindows { windows: Vec<WindowInfo> },
    SetDockPosition { position: DockPosition },
    Enter { window: WindowId },
    Leave,
    Click { window: WindowId },
    ContainerEnter,
    ContainerLeave,
    DragEnter,
    DragLeave,
    CloseRequested { window: WindowId },
}

#[derive(Debug)]
pub struct PreviewCoordinator {
    options: PreviewOptions,
    clock: Clock,
    windows: PreviewSet,
    dock_position: DockPosition,
    hover: HoverState,
    show_timer: Timer,
    leave_timer: Timer,
    intents: IntentQueue,
}

impl PreviewCoordinator {
    pub fn new(options: PreviewOptions, clock: Clock) -> Self {
        Self {
            show_timer: Timer::new(options.show_delay),
            leave_timer: Timer::new(options.leave_delay),
            options,
            clock,
            windows: PreviewSet::default(),
            dock_position: DockPosition::default(),
            hover: HoverState::default(),
            intents: IntentQueue::default(),
        }
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    /// Applies new options; running timers keep their current deadline.
    pub fn set_options(&mut self, options: PreviewOptions) {
        self.show_timer.set_interval(options.show_delay);
        self.leave_timer.set_interval(options.leave_delay);
        self.options = options;
    }

    pub fn windows(&self) -> &PreviewSet {
        &self.windows
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn set_dock_position(&mut self, position: DockPosition) {
        self.dock_position = position;
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        LayoutDirection::for_dock(self.dock_position, self.options.composited)
    }

    pub fn drain_intents(&mut self) -> Vec<Intent> {
        self.intents.drain()
    }

    pub fn handle(&mut self, event: PreviewEvent) {
        match event {
            PreviewEvent::SetWindows { windows } => self.set_windows(windows),
            PreviewEvent::SetDockPosition { position } => self.set_dock_position(position),
            PreviewEvent::Enter { window } => self.on_enter(window),
            PreviewEvent::Leave => self.on_leave(),
            PreviewEvent::Click { window } => self.on_click(window),
            PreviewEvent::ContainerEnter => self.on_container_enter(),
            PreviewEvent::ContainerLeave => self.on_container_leave(),
            PreviewEvent::DragEnter => self.on_drag_enter(),
            PreviewEvent::DragLeave => self.on_drag_leave(),
            PreviewEvent::CloseRequested { window } => self.on_close_requested(window),
        }
    }

    /// Applies a window-list snapshot.
    pub fn set_windows(&mut self, windows: Vec<WindowInfo>) {
        let was_empty = self.windows.is_empty();
        let popup_up = self.hover.previewed.is_some()
            || (self.hover.pointer_inside && self.show_timer.is_active());
        let changes = self.windows.update(windows);

        let lost_tracked = self
            .hover
            .tracked
            .is_some_and(|tracked| changes.removed.contains(&tracked));
        if lost_tracked {
            self.hover.tracked = None;
        }
        let lost_preview = self
            .hover
            .previewed
            .is_some_and(|previewed| changes.removed.contains(&previewed));
        let stale = lost_preview || (lost_tracked && popup_up);
        if stale {
            self.hover.previewed = None;
        }

        if self.windows.is_empty() {
            if !was_empty {
                debug!("last window closed, dismissing popup");
                self.show_timer.stop();
                self.leave_timer.stop();
                self.hover.tracked = None;
                self.hover.previewed = None;
                self.intents.push(Intent::CancelPreview);
                self.intents.push(Intent::HidePreviewPopup);
            }
            return;
        }

        if stale {
            debug!("hovered window closed, cancelling preview");
            self.intents.push(Intent::CancelPreview);
        }
    }

    /// The pointer entered the thumbnail of `window`.
    pub fn on_enter(&mut self, window: WindowId) {
        if !self.windows.contains(window) {
            trace!("ignoring hover over unknown window {window}");
            return;
        }

        if !self.hover.pointer_inside && self.hover.previewed.is_none() {
            self.enter_region();
        }
        self.hover.pointer_inside = true;
        self.leave_timer.stop();

        if !self.options.composited {
            return;
        }

        if let Some(previous) = self.hover.tracked.replace(window) {
            if previous != window {
                trace!("tracking {window} instead of {previous}");
            }
        }

        if !self.show_timer.is_active() {
            self.show_tracked();
        }
    }

    /// The pointer left the hovered thumbnail or the floating preview.
    pub fn on_leave(&mut self) {
        self.leave_region();
    }

    pub fn on_click(&mut self, window: WindowId) {
        if !self.windows.contains(window) {
            trace!("ignoring click on unknown window {window}");
            return;
        }

        debug!("activating {window}");
        self.intents.push(Intent::ActivateWindow { window });
        self.hover.activation = PendingActivation::Clicked;
        self.show_timer.stop();

        self.hover.previewed = None;
        self.intents.push(Intent::HidePreviewPopup);
    }

    pub fn on_container_enter(&mut self) {
        self.enter_region();
        self.hover.pointer_inside = true;
    }

    pub fn on_container_leave(&mut self) {
        self.leave_region();
    }

    /// A drag entered the strip, e.g. a file dragged onto a window thumbnail.
    pub fn on_drag_enter(&mut self) {
        if !self.options.composited {
            return;
        }

        self.hover.activation = PendingActivation::None;
        self.hover.pointer_inside = true;
        self.leave_timer.stop();
    }

    pub fn on_drag_leave(&mut self) {
        self.hover.activation = PendingActivation::DragLeft;
        self.hover.pointer_inside = false;
        self.leave_timer.start(self.clock.now());
    }

    /// A window asked to close from its thumbnail.
    pub fn on_close_requested(&mut self, window: WindowId) {
        if !self.options.composited || !self.windows.contains(window) {
            return;
        }

        // Closing anything but the last thumbnail shifts the others under the pointer.
        if self.windows.last().map(|w| w.id) != Some(window) {
            debug!("closing {window} invalidates the preview layout");
            self.hover.previewed = None;
            self.intents.push(Intent::HidePreviewPopup);
            self.intents.push(Intent::CancelPreview);
        }
    }

    /// Earliest time at which [`Self::dispatch_timers`] has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        [self.show_timer.deadline(), self.leave_timer.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Fires every timer whose deadline passed, earliest first.
    pub fn dispatch_timers(&mut self) {
        let now = self.clock.now();

        let mut due = Vec::with_capacity(2);
        if let Some(deadline) = self.show_timer.deadline().filter(|d| *d <= now) {
            due.push((deadline, DueTimer::Show));
        }
        if let Some(deadline) = self.leave_timer.deadline().filter(|d| *d <= now) {
            due.push((deadline, DueTimer::Leave));
        }
        due.sort_by_key(|(deadline, _)| *deadline);

        for (_, timer) in due {
            match timer {
                DueTimer::Show => {
                    // An earlier timer may have stopped this one.
                    if self.show_timer.fire_if_due(now) {
                        self.show_tracked();
                    }
                }
                DueTimer::Leave => {
                    if self.leave_timer.fire_if_due(now) {
                        self.check_pointer_left();
                    }
                }
            }
        }
    }

    fn enter_region(&mut self) {
        self.hover.activation = PendingActivation::None;
        self.leave_timer.stop();

        if self.options.composited {
            self.show_timer.start(self.clock.now());
        }
    }

    fn leave_region(&mut self) {
        self.hover.pointer_inside = false;
        self.show_timer.stop();
        self.leave_timer.start(self.clock.now());
    }

    fn show_tracked(&mut self) {
        if !self.hover.pointer_inside {
            return;
        }

        let Some(window) = self.hover.tracked else {
            return;
        };

        if self.hover.previewed == Some(window) {
            return;
        }

        debug!("showing preview for {window}");
        self.hover.previewed = Some(window);
        self.intents.push(Intent::ShowPreviewPopup { window });
    }

    fn check_pointer_left(&mut self) {
        if self.hover.pointer_inside {
            return;
        }

        self.hover.previewed = None;

        if self.options.composited {
            match self.hover.activation {
                PendingActivation::None => self.intents.push(Intent::CancelPreview),
                PendingActivation::Clicked => (),
                PendingActivation::DragLeft => {
                    self.hover.activation = PendingActivation::None;
                    if let Some(window) = self.hover.tracked {
                        debug!("activating {window} after drag left the preview");
                        self.intents.push(Intent::ActivateWindow { window });
                    }
                }
            }
        }

        self.intents.push(Intent::HidePreviewPopup);
    }
}

#[derive(Debug, Clone, Copy)]
enum DueTimer {
    Show,
    Leave,
}
