//! Dock geometry: rectangles, dock edges and the outward direction away from the dock.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in logical coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub loc: DVec2,
    pub size: DVec2,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            loc: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }

    pub fn left(&self) -> f64 {
        self.loc.x
    }

    pub fn right(&self) -> f64 {
        self.loc.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.loc.y
    }

    pub fn bottom(&self) -> f64 {
        self.loc.y + self.size.y
    }

    pub fn center(&self) -> DVec2 {
        self.loc + self.size / 2.
    }

    /// The short dimension.
    pub fn thickness(&self) -> f64 {
        f64::min(self.size.x, self.size.y)
    }

    /// Whether the point lies inside; the right and bottom edges are exclusive.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Screen edge the dock is attached to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum DockPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl DockPosition {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Unit vector pointing from the dock toward the screen interior.
    pub fn outward_normal(self) -> DVec2 {
        match self {
            DockPosition::Top => DVec2::Y,
            DockPosition::Bottom => DVec2::NEG_Y,
            DockPosition::Left => DVec2::X,
            DockPosition::Right => DVec2::NEG_X,
        }
    }
}

/// The rectangle of the hosting panel together with the edge it sits on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockRegion {
    pub position: DockPosition,
    pub rect: Rectangle,
}

impl DockRegion {
    pub fn new(position: DockPosition, rect: Rectangle) -> Self {
        Self { position, rect }
    }

    pub fn thickness(&self) -> f64 {
        self.rect.thickness()
    }

    /// Signed distance of `point` past the dock edge that faces the screen interior.
    ///
    /// Negative values are on the dock side of that edge.
    pub fn outward_distance(&self, point: DVec2) -> f64 {
        let rect = &self.rect;
        match self.position {
            DockPosition::Top => point.y - rect.bottom(),
            DockPosition::Bottom => rect.top() - point.y,
            DockPosition::Left => point.x - rect.right(),
            DockPosition::Right => rect.left() - point.x,
        }
    }

    /// Coordinate of `point` along the dock's long axis.
    pub fn main_axis(&self, point: DVec2) -> f64 {
        if self.position.is_horizontal() {
            point.x
        } else {
            point.y
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn outward_distance_per_edge() {
        let bottom = DockRegion::new(DockPosition::Bottom, Rectangle::new(0., 1030., 1920., 50.));
        assert_eq!(bottom.outward_distance(DVec2::new(100., 1000.)), 30.);
        assert_eq!(bottom.outward_distance(DVec2::new(100., 1050.)), -20.);

        let top = DockRegion::new(DockPosition::Top, Rectangle::new(0., 0., 1920., 50.));
        assert_eq!(top.outward_distance(DVec2::new(100., 90.)), 40.);

        let left = DockRegion::new(DockPosition::Left, Rectangle::new(0., 0., 60., 1080.));
        assert_eq!(left.outward_distance(DVec2::new(100., 5.)), 40.);

        let right = DockRegion::new(DockPosition::Right, Rectangle::new(1860., 0., 60., 1080.));
        assert_eq!(right.outward_distance(DVec2::new(1800., 5.)), 60.);
    }

    #[test]
    fn contains_excludes_far_edges() {
        let rect = Rectangle::new(10., 10., 20., 20.);
        assert!(rect.contains(DVec2::new(10., 10.)));
        assert!(!rect.contains(DVec2::new(30., 15.)));
        assert!(!rect.contains(DVec2::new(15., 30.)));
    }

    proptest! {
        #[test]
        fn normal_agrees_with_outward_distance(position in any::<DockPosition>(), step in 0.0f64..500.) {
            let region = DockRegion::new(position, Rectangle::new(100., 100., 400., 40.));
            let start = region.rect.center();
            let moved = start + position.outward_normal() * step;
            let delta = region.outward_distance(moved) - region.outward_distance(start);
            prop_assert!((delta - step).abs() < 1e-9);
        }
    }
}
