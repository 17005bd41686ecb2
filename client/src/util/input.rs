//! Pointer helper utilities for the canvas host.

use touchline::camera::Point;

/// Event position relative to the canvas, in CSS pixels.
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

/// Wheel event position relative to the canvas, in CSS pixels.
pub fn wheel_point(ev: &leptos::ev::WheelEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}
