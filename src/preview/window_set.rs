//! The ordered set of windows a taskbar group can preview.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::DockPosition;
use crate::intent::WindowId;

/// Gap kept between the preview strip and the screen edges.
const SCREEN_PADDING: f64 = 20.;
/// Height of one title row when there is no compositor to draw thumbnails.
const TITLE_ROW_HEIGHT: f64 = 30.;

/// Lightweight descriptor of an open window. The live capture belongs to the widget layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub id: WindowId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub closable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    Horizontal,
    Vertical,
}

impl LayoutDirection {
    pub fn for_dock(position: DockPosition, composited: bool) -> Self {
        if composited && position.is_horizontal() {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// What changed after [`PreviewSet::update`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetChanges {
    pub removed: Vec<WindowId>,
    pub added: Vec<WindowId>,
}

/// Windows in insertion order; the order drives the thumbnail layout.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PreviewSet {
    windows: Vec<WindowInfo>,
}

impl PreviewSet {
    /// Replaces the set with a fresh snapshot.
    ///
    /// Windows missing from the snapshot are dropped, new ones are appended after the existing
    /// ones, and windows present in both keep their position with refreshed details.
    pub fn update(&mut self, snapshot: Vec<WindowInfo>) -> SetChanges {
        let mut changes = SetChanges::default();

        self.windows.retain(|window| {
            let keep = snapshot.iter().any(|info| info.id == window.id);
            if !keep {
                changes.removed.push(window.id);
            }
            keep
        });

        for info in snapshot {
            if let Some(existing) = self.windows.iter_mut().find(|w| w.id == info.id) {
                *existing = info;
            } else {
                changes.added.push(info.id);
                self.windows.push(info);
            }
        }

        changes
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.iter().any(|w| w.id == id)
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowInfo> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// The newest window.
    pub fn last(&self) -> Option<&WindowInfo> {
        self.windows.last()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowInfo> + '_ {
        self.windows.iter()
    }

    /// Number of visible thumbnails and the size of the strip holding them.
    ///
    /// Without a compositor, windows are listed as title rows one thumbnail wide.
    pub fn strip_size(
        &self,
        direction: LayoutDirection,
        composited: bool,
        screen: DVec2,
        thumbnail: DVec2,
    ) -> (usize, DVec2) {
        let len = self.windows.len();
        if len == 0 {
            return (0, DVec2::ZERO);
        }

        if !composited {
            let count = len.min(fits(screen.y - SCREEN_PADDING, TITLE_ROW_HEIGHT));
            return (count, DVec2::new(thumbnail.x, TITLE_ROW_HEIGHT * count as f64));
        }

        match direction {
            LayoutDirection::Horizontal => {
                let count = len.min(fits(screen.x - SCREEN_PADDING, thumbnail.x));
                let w = f64::min(thumbnail.x * count as f64, screen.x - SCREEN_PADDING);
                (count, DVec2::new(w, thumbnail.y))
            }
            LayoutDirection::Vertical => {
                let count = len.min(fits(screen.y - SCREEN_PADDING, thumbnail.y));
                let h = f64::min(thumbnail.y * count as f64, screen.y - SCREEN_PADDING);
                (count, DVec2::new(thumbnail.x, h))
            }
        }
    }
}

/// How many items of `item` size fit into `space`, at least one.
fn fits(space: f64, item: f64) -> usize {
    if item <= 0. {
        return usize::MAX;
    }

    ((space / item).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: u64, title: &str) -> WindowInfo {
        WindowInfo {
            id: WindowId(id),
            title: title.to_owned(),
            closable: true,
        }
    }

    fn ids(set: &PreviewSet) -> Vec<u64> {
        set.iter().map(|w| w.id.0).collect()
    }

    #[test]
    fn update_keeps_insertion_order() {
        let mut set = PreviewSet::default();
        set.update(vec![info(1, "a"), info(2, "b")]);

        let changes = set.update(vec![info(3, "c"), info(2, "b2")]);
        assert_eq!(ids(&set), [2, 3]);
        assert_eq!(changes.removed, [WindowId(1)]);
        assert_eq!(changes.added, [WindowId(3)]);
        assert_eq!(set.get(WindowId(2)).unwrap().title, "b2");
        assert_eq!(set.last().unwrap().id, WindowId(3));
    }

    #[test]
    fn direction_follows_dock_edge() {
        assert_eq!(
            LayoutDirection::for_dock(DockPosition::Bottom, true),
            LayoutDirection::Horizontal
        );
        assert_eq!(
            LayoutDirection::for_dock(DockPosition::Left, true),
            LayoutDirection::Vertical
        );
        assert_eq!(
            LayoutDirection::for_dock(DockPosition::Top, false),
            LayoutDirection::Vertical
        );
    }

    #[test]
    fn strip_is_capped_by_screen() {
        let mut set = PreviewSet::default();
        set.update((1..=10).map(|id| info(id, "w")).collect());

        let screen = DVec2::new(1000., 800.);
        let thumbnail = DVec2::new(200., 130.);

        let (count, size) = set.strip_size(LayoutDirection::Horizontal, true, screen, thumbnail);
        assert_eq!(count, 4);
        assert_eq!(size, DVec2::new(800., 130.));

        let (count, size) = set.strip_size(LayoutDirection::Vertical, true, screen, thumbnail);
        assert_eq!(count, 6);
        assert_eq!(size, DVec2::new(200., 780.));

        let (count, size) = set.strip_size(LayoutDirection::Vertical, false, screen, thumbnail);
        assert_eq!(count, 10);
        assert_eq!(size, DVec2::new(200., 300.));
    }
}
