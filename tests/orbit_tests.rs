// Host-side tests for the orbit camera controls.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod orbit {
        include!("../src/core/orbit.rs");
    }
}

use crate::core::constants::*;
use crate::core::orbit::*;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn defaults_rotate_only_with_damping() {
    let c = OrbitControls::new(Vec3::ZERO);
    assert!(c.enable_damping);
    assert_eq!(c.damping_factor, ORBIT_DAMPING_FACTOR);
    assert!(!c.enable_zoom);
    assert!(!c.enable_pan);
    assert!(!c.is_dragging());
}

#[test]
fn spherical_matches_y_up_convention() {
    let s = Spherical::from_offset(Vec3::new(0.0, 2.0, 2.0));
    assert!(approx(s.radius, 8f32.sqrt()));
    assert!(approx(s.phi, PI / 4.0));
    assert!(approx(s.theta, 0.0));
    let back = s.to_offset();
    assert!(back.abs_diff_eq(Vec3::new(0.0, 2.0, 2.0), 1e-4));

    let side = Spherical::from_offset(Vec3::X);
    assert!(approx(side.theta, FRAC_PI_2));
    assert!(approx(side.phi, FRAC_PI_2));
}

#[test]
fn drag_lifecycle_emits_start_change_end() {
    let mut c = OrbitControls::new(Vec3::ZERO);
    assert_eq!(c.begin_drag(1, Vec2::new(10.0, 10.0)), Some(ControlEvent::Start));
    assert!(c.is_dragging());
    assert_eq!(
        c.drag_to(1, Vec2::new(20.0, 10.0), 100.0),
        Some(ControlEvent::Change)
    );
    assert_eq!(c.end_drag(1), Some(ControlEvent::End));
    assert!(!c.is_dragging());
}

#[test]
fn second_pointer_and_foreign_events_are_ignored() {
    let mut c = OrbitControls::new(Vec3::ZERO);
    c.begin_drag(1, Vec2::ZERO);
    assert_eq!(c.begin_drag(2, Vec2::ZERO), None);
    assert_eq!(c.drag_to(2, Vec2::new(50.0, 0.0), 100.0), None);
    assert_eq!(c.end_drag(2), None);
    assert!(c.is_dragging());
    assert_eq!(c.pending_rotation(), (0.0, 0.0));
}

#[test]
fn move_without_drag_or_height_does_nothing() {
    let mut c = OrbitControls::new(Vec3::ZERO);
    assert_eq!(c.drag_to(1, Vec2::new(5.0, 5.0), 100.0), None);
    c.begin_drag(1, Vec2::ZERO);
    assert_eq!(c.drag_to(1, Vec2::ZERO, 100.0), None);
    assert_eq!(c.drag_to(1, Vec2::new(5.0, 0.0), 0.0), None);
    assert_eq!(c.pending_rotation(), (0.0, 0.0));
}

#[test]
fn full_height_drag_is_one_turn() {
    let mut c = OrbitControls::new(Vec3::ZERO);
    c.begin_drag(1, Vec2::ZERO);
    c.drag_to(1, Vec2::new(200.0, 0.0), 200.0);
    let (dt, dp) = c.pending_rotation();
    assert!(approx(dt, -2.0 * PI));
    assert_eq!(dp, 0.0);
}

#[test]
fn undamped_update_applies_whole_delta() {
    let mut c = OrbitControls::new(Vec3::ZERO);
    c.enable_damping = false;
    c.begin_drag(1, Vec2::ZERO);
    c.drag_to(1, Vec2::new(25.0, 0.0), 100.0); // quarter turn to the left
    let mut eye = Vec3::new(0.0, 2.0, 2.0);
    assert!(c.update(&mut eye));
    assert!(eye.abs_diff_eq(Vec3::new(-2.0, 2.0, 0.0), 1e-4), "eye={eye}");
    assert_eq!(c.pending_rotation(), (0.0, 0.0));
    assert!(!c.update(&mut eye));
}

#[test]
fn damped_update_glides_and_decays() {
    let mut c = OrbitControls::new(Vec3::ZERO);
    c.begin_drag(1, Vec2::ZERO);
    c.drag_to(1, Vec2::new(10.0, 0.0), 100.0);
    c.end_drag(1);
    let (start, _) = c.pending_rotation();

    let mut eye = Vec3::new(0.0, 2.0, 2.0);
    let radius = eye.length();
    assert!(c.update(&mut eye));
    let (after, _) = c.pending_rotation();
    assert!(approx(after, start * (1.0 - ORBIT_DAMPING_FACTOR)));

    // Keeps moving after the drag ended, at a constant distance
    let before = eye;
    assert!(c.update(&mut eye));
    assert!(eye.distance(before) > 0.0);
    assert!(approx(eye.length(), radius));
}

#[test]
fn polar_angle_is_clamped_off_the_poles() {
    let mut c = OrbitControls::new(Vec3::ZERO);
    c.enable_damping = false;
    c.begin_drag(1, Vec2::ZERO);
    c.drag_to(1, Vec2::new(0.0, 500.0), 100.0);
    let mut eye = Vec3::new(0.0, 2.0, 2.0);
    c.update(&mut eye);
    // Pinned just short of straight up, never past it
    assert!(eye.is_finite());
    assert!(eye.y > 0.0);
    assert!(Vec2::new(eye.x, eye.z).length() > 0.0);
    assert!((eye.length() - 8f32.sqrt()).abs() < 1e-4);
}

#[test]
fn wheel_is_not_consumed_without_zoom() {
    let mut c = OrbitControls::new(Vec3::ZERO);
    assert_eq!(c.wheel(120.0), None);
}
