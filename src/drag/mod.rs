//! Drag gestures on reorderable dock items.
//!
//! [`DragCoordinator`] turns raw pointer events into one of three outcomes per gesture: the item
//! is dropped into a new slot, the drag is cancelled and the item goes back, or the item is
//! dragged far enough away from the dock to be removed.
//!
//! ```text
//! Idle -> Pressed -> Dragging -> Finished(Dropped | Cancelled | RemoveRequested) -> Idle
//! ```

use std::mem;
use std::time::Duration;

use glam::DVec2;
use tracing::{debug, trace};

use crate::animation::PointAnimation;
use crate::clock::Clock;
use crate::geometry::DockRegion;
use crate::input::{Buttons, PointerSource};
use crate::intent::{Intent, IntentQueue, ItemId};
use crate::timer::Timer;

mod geometry;
mod types;

pub use geometry::{drop_index, is_remove_able, removal_distance};
pub use types::{
    CancelReason, DragEvent, DragItem, DragOptions, DragOutcome, DragSession, DragState, GoBack,
    ItemKind,
};
use types::PendingRemoval;


#[derive(Debug)]
pub struct DragCoordinator {
    options: DragOptions,
    clock: Clock,
    dock: DockRegion,
    /// Reorderable items in display order.
    items: Vec<DragItem>,
    state: DragState,
    /// Whether the backend confirmed a long touch press for the current gesture.
    touch_press_confirmed: bool,
    go_back: Option<GoBack>,
    pending_removal: Option<PendingRemoval>,
    intents: IntentQueue,
}

impl DragCoordinator {
    pub fn new(options: DragOptions, clock: Clock) -> Self {
        Self {
            options,
            clock,
            dock: DockRegion::default(),
            items: Vec::new(),
            state: DragState::Idle,
            touch_press_confirmed: false,
            go_back: None,
            pending_removal: None,
            intents: IntentQueue::default(),
        }
    }

    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Applies new options. An ongoing session keeps the thresholds it started with.
    pub fn set_options(&mut self, options: DragOptions) {
        self.options = options;
    }

    pub fn set_dock(&mut self, dock: DockRegion) {
        self.dock = dock;
    }

    pub fn dock(&self) -> &DockRegion {
        &self.dock
    }

    pub fn set_items(&mut self, items: Vec<DragItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[DragItem] {
        &self.items
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn drain_intents(&mut self) -> Vec<Intent> {
        self.intents.drain()
    }

    pub fn handle(&mut self, event: DragEvent) {
        match event {
            DragEvent::SetDock { dock } => self.set_dock(dock),
            DragEvent::SetItems { items } => self.set_items(items),
            DragEvent::PointerDown { item, pos } => self.pointer_down(item, pos),
            DragEvent::PointerMove {
                pos,
                source,
                buttons,
            } => self.pointer_move(pos, source, buttons),
            DragEvent::PointerUp { pos } => self.pointer_up(pos),
            DragEvent::ConfirmTouchDragPress => self.confirm_touch_drag_press(),
            DragEvent::Cancel => self.cancel(),
            DragEvent::Reject => self.reject(),
            DragEvent::TakeOutcome => {
                self.take_outcome();
            }
        }
    }

    /// Records a button press on `item`; no session exists until the pointer moves far enough.
    pub fn pointer_down(&mut self, item: ItemId, pos: DVec2) {
        if !self.items.iter().any(|it| it.id == item) {
            trace!("ignoring press on unknown item {item}");
            return;
        }

        if !matches!(self.state, DragState::Idle) {
            debug!("press on {item} supersedes {:?}", self.state);
        }

        self.flush_pending_removal();
        self.go_back = None;
        self.touch_press_confirmed = false;
        self.state = DragState::Pressed { item, origin: pos };
    }

    pub fn confirm_touch_drag_press(&mut self) {
        self.touch_press_confirmed = true;
    }

    pub fn pointer_move(&mut self, pos: DVec2, source: PointerSource, buttons: Buttons) {
        match &mut self.state {
            DragState::Pressed { item, origin } => {
                // Chords with other buttons never start a drag.
                if buttons != Buttons::PRIMARY {
                    return;
                }

                let delta = pos - *origin;
                if delta.x.abs() + delta.y.abs() < self.options.start_threshold {
                    return;
                }

                // Touch input translated into mouse events starts a drag only after the backend
                // confirmed a long press.
                if source == PointerSource::SynthesizedTouch && !self.touch_press_confirmed {
                    trace!("ignoring synthesized touch move without confirmed press");
                    return;
                }

                let item = item.clone();
                let origin = *origin;
                let Some(slot) = self.items.iter().find(|it| it.id == item) else {
                    // The item vanished from the list while pressed.
                    self.state = DragState::Idle;
                    return;
                };

                debug!("drag started for {item}");
                let mut session = DragSession {
                    item,
                    kind: slot.kind,
                    removable: slot.removable,
                    origin,
                    current: origin,
                    dock: self.dock,
                    distance_threshold: removal_distance(&self.dock, self.options.distance_multiple),
                    remove_able: false,
                };
                update_session(&mut session, pos, &mut self.intents);
                self.state = DragState::Dragging(session);
            }
            DragState::Dragging(session) => {
                update_session(session, pos, &mut self.intents);
            }
            DragState::Idle | DragState::Finished(_) => (),
        }
    }

    pub fn pointer_up(&mut self, pos: DVec2) {
        match mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(mut session) => {
                session.current = pos;
                self.touch_press_confirmed = false;

                if session.is_remove_able_at(pos) {
                    self.request_removal(session);
                    return;
                }

                if session.remove_able {
                    session.remove_able = false;
                    self.intents.push(Intent::RemoveHint {
                        item: session.item.clone(),
                        visible: false,
                    });
                }

                if let Some(index) = drop_index(&session.dock, &self.items, pos) {
                    debug!("dropped {} at index {index}", session.item);
                    self.intents.push(Intent::ReorderItem {
                        item: session.item.clone(),
                        index,
                    });
                    self.state = DragState::Finished(DragOutcome::Dropped {
                        item: session.item,
                        index,
                    });
                } else {
                    self.finish_cancelled(session, CancelReason::Rejected);
                }
            }
            DragState::Pressed { item, .. } => {
                trace!("release without drag on {item}");
                self.touch_press_confirmed = false;
            }
            state @ DragState::Finished(_) => self.state = state,
            DragState::Idle => trace!("ignoring release without a gesture"),
        }
    }

    /// Cancels the ongoing drag, e.g. on Escape.
    pub fn cancel(&mut self) {
        self.abort(CancelReason::Cancelled);
    }

    /// The drop target refused the dragged item.
    pub fn reject(&mut self) {
        self.abort(CancelReason::Rejected);
    }

    fn abort(&mut self, reason: CancelReason) {
        match mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(session) => self.finish_cancelled(session, reason),
            DragState::Pressed { .. } => self.touch_press_confirmed = false,
            state => self.state = state,
        }
    }

    /// Returns the terminal outcome of the last gesture and goes back to idle.
    pub fn take_outcome(&mut self) -> Option<DragOutcome> {
        match mem::replace(&mut self.state, DragState::Idle) {
            DragState::Finished(outcome) => Some(outcome),
            state => {
                self.state = state;
                None
            }
        }
    }

    /// Drops whatever gesture is in progress without emitting anything.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.touch_press_confirmed = false;
    }

    /// Whether a drop at `pos` would remove the currently dragged item.
    pub fn is_remove_able(&self, pos: DVec2) -> bool {
        match &self.state {
            DragState::Dragging(session) => session.is_remove_able_at(pos),
            _ => false,
        }
    }

    /// Current position of an item travelling back after a cancelled drag.
    pub fn go_back_position(&self) -> Option<(&ItemId, DVec2)> {
        let go_back = self.go_back.as_ref()?;
        let now = self.clock.now();
        (!go_back.anim.is_done(now)).then(|| (&go_back.item, go_back.anim.value(now)))
    }

    pub fn go_back(&self) -> Option<&GoBack> {
        self.go_back.as_ref()
    }

    /// Earliest time at which [`Self::dispatch_timers`] has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        let removal = self
            .pending_removal
            .as_ref()
            .and_then(|removal| removal.timer.deadline());
        let go_back = self.go_back.as_ref().map(|go_back| go_back.anim.end_time());
        [removal, go_back].into_iter().flatten().min()
    }

    pub fn dispatch_timers(&mut self) {
        let now = self.clock.now();

        if let Some(removal) = &mut self.pending_removal {
            if removal.timer.fire_if_due(now) {
                let item = removal.item.clone();
                self.pending_removal = None;
                debug!("removal animation finished for {item}");
                self.intents.push(Intent::RemoveItem { item });
            }
        }

        if self.go_back.as_ref().is_some_and(|go_back| go_back.anim.is_done(now)) {
            self.go_back = None;
        }
    }

    fn request_removal(&mut self, session: DragSession) {
        debug!("remove requested for {}", session.item);
        let item = session.item;

        if session.kind == ItemKind::DockedApp {
            self.intents.push(Intent::AnimateRemoval { item: item.clone() });
            let mut timer = Timer::new(self.options.remove_animation_duration);
            timer.start(self.clock.now());
            self.pending_removal = Some(PendingRemoval {
                item: item.clone(),
                timer,
            });
        } else {
            self.intents.push(Intent::RemoveItem { item: item.clone() });
        }

        self.touch_press_confirmed = false;
        self.state = DragState::Finished(DragOutcome::RemoveRequested { item });
    }

    fn finish_cancelled(&mut self, session: DragSession, reason: CancelReason) {
        debug!("drag of {} cancelled: {reason:?}", session.item);
        self.intents.push(Intent::CancelDrag {
            item: session.item.clone(),
        });

        if session.remove_able {
            self.intents.push(Intent::RemoveHint {
                item: session.item.clone(),
                visible: false,
            });
        }

        self.go_back = Some(GoBack {
            item: session.item.clone(),
            anim: PointAnimation::new(
                session.current,
                session.origin,
                self.clock.now(),
                self.options.go_back_duration,
            ),
        });

        self.touch_press_confirmed = false;
        self.state = DragState::Finished(DragOutcome::Cancelled {
            item: session.item,
            reason,
        });
    }

    fn flush_pending_removal(&mut self) {
        if let Some(removal) = self.pending_removal.take() {
            debug!("flushing pending removal of {}", removal.item);
            self.intents.push(Intent::RemoveItem { item: removal.item });
        }
    }
}

fn update_session(session: &mut DragSession, pos: DVec2, intents: &mut IntentQueue) {
    session.current = pos;

    let remove_able = session.is_remove_able_at(pos);
    if remove_able != session.remove_able {
        session.remove_able = remove_able;
        intents.push(Intent::RemoveHint {
            item: session.item.clone(),
            visible: remove_able,
        });
    }
}
