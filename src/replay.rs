//! Replaying recorded input traces through both coordinators.
//!
//! A trace is a JSON-lines file. Each line carries a timestamp and one event for either
//! coordinator:
//!
//! ```text
//! {"at-ms": 0, "preview": {"type": "set-windows", "windows": [{"id": 10}]}}
//! {"at-ms": 5, "preview": {"type": "enter", "window": 10}}
//! {"at-ms": 40, "drag": {"type": "pointer-down", "item": "files", "pos": [125.0, 1055.0]}}
//! ```
//!
//! Time is virtual: timers due before an entry fire at their own deadline before the entry is
//! delivered, and the replay ends by firing whatever timers remain.

use std::time::Duration;

use anyhow::{bail, Context};
use dock_interact_config::Config;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::clock::Clock;
use crate::drag::{DragCoordinator, DragEvent, DragOptions};
use crate::intent::Intent;
use crate::preview::{PreviewCoordinator, PreviewEvent, PreviewOptions};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TraceEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: TraceEvent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceEvent {
    Drag(DragEvent),
    Preview(PreviewEvent),
}

/// An intent together with the virtual time it was emitted at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimedIntent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub intent: Intent,
}

/// Parses a JSON-lines trace. Blank lines are skipped.
pub fn parse_trace(text: &str) -> anyhow::Result<Vec<TraceEntry>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("error parsing line {}", idx + 1))
        })
        .collect()
}

pub struct Replayer {
    clock: Clock,
    drag: DragCoordinator,
    preview: PreviewCoordinator,
    output: Vec<TimedIntent>,
}

impl Replayer {
    pub fn new(config: &Config) -> Self {
        let clock = Clock::with_time(Duration::ZERO);
        Self {
            drag: DragCoordinator::new(DragOptions::from(&config.drag), clock.clone()),
            preview: PreviewCoordinator::new(PreviewOptions::from(&config.preview), clock.clone()),
            clock,
            output: Vec::new(),
        }
    }

    pub fn feed(&mut self, entry: TraceEntry) -> anyhow::Result<()> {
        let _span = tracy_client::span!("Replayer::feed");

        let at = Duration::from_millis(entry.at_ms);
        let now = self.clock.now();
        if at < now {
            bail!(
                "trace goes back in time: {}ms after {}ms",
                entry.at_ms,
                now.as_millis()
            );
        }

        self.advance_to(at);

        trace!("{}ms: {:?}", entry.at_ms, entry.event);
        match entry.event {
            TraceEvent::Drag(event) => self.drag.handle(event),
            TraceEvent::Preview(event) => self.preview.handle(event),
        }
        self.collect();

        Ok(())
    }

    /// Fires the remaining timers and returns every intent emitted during the replay.
    pub fn finish(mut self) -> Vec<TimedIntent> {
        while let Some(deadline) = self.next_deadline() {
            self.advance_to(deadline);
        }
        self.output
    }

    pub fn run(config: &Config, entries: Vec<TraceEntry>) -> anyhow::Result<Vec<TimedIntent>> {
        let _span = tracy_client::span!("Replayer::run");

        let mut replayer = Self::new(config);
        for entry in entries {
            replayer.feed(entry)?;
        }
        Ok(replayer.finish())
    }

    fn next_deadline(&self) -> Option<Duration> {
        [self.drag.next_deadline(), self.preview.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    fn advance_to(&mut self, target: Duration) {
        while let Some(deadline) = self.next_deadline().filter(|d| *d <= target) {
            self.clock.set_time(deadline);
            self.drag.dispatch_timers();
            self.preview.dispatch_timers();
            self.collect();
        }

        self.clock.set_time(target);
        self.drag.dispatch_timers();
    }

    fn collect(&mut self) {
        let at_ms = u64::try_from(self.clock.now().as_millis()).unwrap_or(u64::MAX);
        let drag = self.drag.drain_intents();
        let preview = self.preview.drain_intents();
        self.output.extend(
            drag.into_iter()
                .chain(preview)
                .map(|intent| TimedIntent { at_ms, intent }),
        );
    }
}
