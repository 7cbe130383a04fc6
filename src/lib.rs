//! Drag-and-reorder and window-preview interaction logic for a desktop dock.
//!
//! The widget layer feeds pointer, hover and window-list events into a [`DragCoordinator`] and a
//! [`PreviewCoordinator`], and applies the [`Intent`]s they queue in response. Both run on the
//! caller's event loop; timers are deadlines the loop polls through `next_deadline()` and
//! `dispatch_timers()`.

pub mod animation;
pub mod cli;
pub mod clock;
pub mod drag;
pub mod geometry;
pub mod input;
pub mod intent;
pub mod preview;
pub mod replay;
pub mod timer;
pub mod utils;

pub use drag::DragCoordinator;
pub use intent::Intent;
pub use preview::PreviewCoordinator;
