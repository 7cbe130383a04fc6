//! Drop classification: removal distance and target slot.

use glam::DVec2;

use super::DragItem;
use crate::geometry::DockRegion;

/// Whether a drop at `point` is far enough from the dock to remove the dragged item.
///
/// The distance is measured from the dock edge facing the screen interior, and compared against
/// `distance_multiple` times the dock thickness.
pub fn is_remove_able(dock: &DockRegion, distance_multiple: f64, point: DVec2) -> bool {
    dock.outward_distance(point) > removal_distance(dock, distance_multiple)
}

pub fn removal_distance(dock: &DockRegion, distance_multiple: f64) -> f64 {
    distance_multiple * dock.thickness()
}

/// Index of the slot a drop at `point` lands in.
///
/// A point in the gap between slots (or past the ends of the list) still inside the dock snaps
/// to the slot closest along the dock's long axis. Points outside the dock have no slot.
pub fn drop_index(dock: &DockRegion, items: &[DragItem], point: DVec2) -> Option<usize> {
    if let Some(idx) = items.iter().position(|item| item.rect.contains(point)) {
        return Some(idx);
    }

    if !dock.rect.contains(point) {
        return None;
    }

    let along = dock.main_axis(point);
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| (idx, (dock.main_axis(item.rect.center()) - along).abs()))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::drag::ItemKind;
    use crate::geometry::{DockPosition, Rectangle};
    use crate::intent::ItemId;

    fn bottom_dock() -> DockRegion {
        DockRegion::new(DockPosition::Bottom, Rectangle::new(0., 1030., 1920., 50.))
    }

    fn slots() -> Vec<DragItem> {
        (0..3)
            .map(|i| DragItem {
                id: ItemId(format!("app-{i}")),
                rect: Rectangle::new(100. + f64::from(i) * 60., 1030., 50., 50.),
                kind: ItemKind::DockedApp,
                removable: true,
            })
            .collect()
    }

    #[test]
    fn fifty_pixel_dock_with_unit_multiple() {
        let dock = bottom_dock();
        let edge = dock.rect.top();

        assert!(!is_remove_able(&dock, 1., DVec2::new(500., edge - 40.)));
        assert!(!is_remove_able(&dock, 1., DVec2::new(500., edge - 50.)));
        assert!(is_remove_able(&dock, 1., DVec2::new(500., edge - 60.)));
    }

    #[test]
    fn inside_dock_is_never_remove_able() {
        let dock = bottom_dock();
        assert!(!is_remove_able(&dock, 0., dock.rect.center()));
    }

    #[test]
    fn drop_on_slot() {
        let items = slots();
        assert_eq!(drop_index(&bottom_dock(), &items, DVec2::new(175., 1050.)), Some(1));
    }

    #[test]
    fn drop_in_gap_snaps_to_nearest() {
        let items = slots();
        let dock = bottom_dock();
        // Gap between slot 1 (160..210) and slot 2 (220..270), closer to slot 2.
        assert_eq!(drop_index(&dock, &items, DVec2::new(216., 1050.)), Some(2));
        // Past the end of the list.
        assert_eq!(drop_index(&dock, &items, DVec2::new(1500., 1050.)), Some(2));
    }

    #[test]
    fn drop_outside_dock_has_no_slot() {
        assert_eq!(drop_index(&bottom_dock(), &slots(), DVec2::new(175., 900.)), None);
        assert_eq!(drop_index(&bottom_dock(), &[], DVec2::new(175., 1050.)), None);
    }

    proptest! {
        #[test]
        fn remove_able_is_monotonic(
            position in any::<DockPosition>(),
            multiple in 0.0f64..4.,
            near in 0.0f64..400.,
            extra in 0.0f64..400.,
        ) {
            let dock = DockRegion::new(position, Rectangle::new(0., 0., 800., 48.));
            let normal = position.outward_normal();
            let start = dock.rect.center();

            if is_remove_able(&dock, multiple, start + normal * near) {
                prop_assert!(is_remove_able(&dock, multiple, start + normal * (near + extra)));
            }
        }
    }
}
