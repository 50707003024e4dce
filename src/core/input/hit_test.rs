//=========================================================================
// Hit Testing
//=========================================================================
//
// Resolves which single clickable object sits under the pointer.
//
// The scan runs in reverse sort order so the topmost object wins: higher
// `sorting_order` first, then the later-inserted of equal orders.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Vector2;
use crate::core::object::{GameObject, GameObjectId, GameObjectRegistry};

//=== Public API ==========================================================

/// Topmost eligible object containing `point` (precise world position).
pub fn hovered_object(objects: &GameObjectRegistry, point: Vector2) -> Option<GameObjectId> {
    objects
        .iter()
        .rev()
        .find(|object| accepts_pointer(*object, point))
        .map(|object| object.id())
}

/// Eligibility for hover resolution.
///
/// The object must be enabled, clickable, not ignoring raycasts, have a
/// strictly positive scale on both axes and contain `point` (inclusive
/// on every edge).
pub fn accepts_pointer(object: &dyn GameObject, point: Vector2) -> bool {
    let core = object.core();
    if !core.enabled {
        return false;
    }

    let Some(clickable) = object.as_clickable() else {
        return false;
    };

    !clickable.ignore_raycast() && core.transform.has_area() && core.transform.contains_point(point)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Transform;
    use crate::core::object::test_support::Stub;
    use crate::core::object::ObjectCore;

    fn unit_at(x: f64, y: f64) -> Transform {
        Transform::new(Vector2::new(x, y), Vector2::ONE)
    }

    fn registry_with(stubs: Vec<Stub>) -> (GameObjectRegistry, Vec<GameObjectId>) {
        let mut registry = GameObjectRegistry::new();
        let ids = stubs.iter().map(|stub| stub.core().id()).collect();
        for stub in stubs {
            registry.insert(Box::new(stub)).unwrap();
        }
        (registry, ids)
    }

    #[test]
    fn later_insertion_wins_at_equal_order() {
        let (registry, ids) = registry_with(vec![
            Stub::clickable().with_transform(unit_at(0.0, 0.0)),
            Stub::clickable().with_transform(unit_at(0.0, 0.0)),
        ]);
        assert_eq!(hovered_object(&registry, Vector2::new(0.5, 0.5)), Some(ids[1]));
    }

    #[test]
    fn higher_sorting_order_wins_regardless_of_insertion() {
        let mut top = Stub::with_core(
            ObjectCore::new().with_sorting_order(10).with_transform(unit_at(0.0, 0.0)),
        );
        top.clickable = true;
        let (registry, ids) = registry_with(vec![
            top,
            Stub::clickable().with_transform(unit_at(0.0, 0.0)),
        ]);
        assert_eq!(hovered_object(&registry, Vector2::new(0.5, 0.5)), Some(ids[0]));
    }

    #[test]
    fn bounds_are_inclusive() {
        let (registry, ids) = registry_with(vec![Stub::clickable().with_transform(unit_at(1.0, 1.0))]);
        assert_eq!(hovered_object(&registry, Vector2::new(2.0, 2.0)), Some(ids[0]));
        assert_eq!(hovered_object(&registry, Vector2::new(1.0, 1.0)), Some(ids[0]));
        assert_eq!(hovered_object(&registry, Vector2::new(3.0, 2.0)), None);
    }

    #[test]
    fn ineligible_objects_are_skipped() {
        let mut disabled = Stub::clickable().with_transform(unit_at(0.0, 0.0));
        disabled.core_mut().enabled = false;
        let mut ignoring = Stub::clickable().with_transform(unit_at(0.0, 0.0));
        ignoring.ignore_raycast = true;
        let flat = Stub::clickable().with_transform(Transform::new(Vector2::ZERO, Vector2::new(1.0, 0.0)));
        let plain = Stub::new().with_transform(unit_at(0.0, 0.0));

        let (registry, _) = registry_with(vec![disabled, ignoring, flat, plain]);
        assert_eq!(hovered_object(&registry, Vector2::new(0.0, 0.0)), None);
    }

    #[test]
    fn falls_through_to_lower_eligible_object() {
        let mut ignoring = Stub::clickable().with_transform(unit_at(0.0, 0.0));
        ignoring.ignore_raycast = true;
        let (registry, ids) = registry_with(vec![
            Stub::clickable().with_transform(unit_at(0.0, 0.0)),
            ignoring,
        ]);
        assert_eq!(hovered_object(&registry, Vector2::new(0.5, 0.5)), Some(ids[0]));
    }
}
