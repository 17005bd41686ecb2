use super::*;

use uuid::Uuid;

fn anchor() -> (Point, Viewport) {
    (Point::new(10.0, 10.0), Viewport::default())
}

// --- Interaction ---

#[test]
fn new_interaction_starts_unmoved_with_empty_trail() {
    let (pt, vp) = anchor();
    let i = Interaction::new(InteractionKind::Pan, pt, vp);
    assert!(!i.has_moved);
    assert!(i.trail.is_empty());
    assert_eq!(i.anchor_model, pt);
}

#[test]
fn batch_key_maps_token_and_waypoint_drags() {
    let (pt, vp) = anchor();
    let id = Uuid::new_v4();

    let token_drag = Interaction::new(InteractionKind::TokenDrag { token: id }, pt, vp);
    assert_eq!(token_drag.batch_key(), Some(BatchKey::Token(id)));

    let wp_drag =
        Interaction::new(InteractionKind::WaypointDrag { token: id, index: 3 }, pt, vp);
    assert_eq!(wp_drag.batch_key(), Some(BatchKey::Waypoint { token: id, index: 3 }));

    let pan = Interaction::new(InteractionKind::Pan, pt, vp);
    assert_eq!(pan.batch_key(), None);
}

// --- DragTrail ---

#[test]
fn trail_keeps_insertion_order() {
    let mut trail = DragTrail::default();
    trail.push(Point::new(1.0, 1.0));
    trail.push(Point::new(2.0, 2.0));
    let points: Vec<Point> = trail.iter().collect();
    assert_eq!(points, vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
}

#[test]
fn trail_is_bounded_and_drops_oldest_first() {
    let mut trail = DragTrail::default();
    for i in 0..25 {
        trail.push(Point::new(f64::from(i), 0.0));
    }
    assert_eq!(trail.len(), crate::consts::TRAIL_MAX_POINTS);
    let first = trail.iter().next();
    assert_eq!(first, Some(Point::new(15.0, 0.0)));
    let last = trail.iter().last();
    assert_eq!(last, Some(Point::new(24.0, 0.0)));
}

#[test]
fn trail_clear_empties_it() {
    let mut trail = DragTrail::default();
    trail.push(Point::new(1.0, 1.0));
    trail.clear();
    assert!(trail.is_empty());
    assert_eq!(trail.len(), 0);
}
