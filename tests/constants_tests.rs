// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_sane() {
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
    assert!(CAMERA_NEAR > 0.0);
    assert!(CAMERA_FAR > CAMERA_NEAR);
    // The eye must sit inside the clip range or the model is culled
    let dist = CAMERA_EYE.distance(CAMERA_TARGET);
    assert!(dist > CAMERA_NEAR && dist < CAMERA_FAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbit_and_rotation_constants_are_within_bounds() {
    assert!(ORBIT_DAMPING_FACTOR > 0.0 && ORBIT_DAMPING_FACTOR < 1.0);
    assert!(ORBIT_ROTATE_SPEED > 0.0);
    assert!(AUTO_ROTATE_STEP_RAD > 0.0);
    assert!(MODEL_FIT_EXTENT > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn directional_light_is_brighter_than_ambient() {
    assert!(DIRECTIONAL_INTENSITY > AMBIENT_INTENSITY);
    assert!(DIRECTIONAL_POSITION.length() > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn popup_activates_before_it_can_be_removed() {
    assert!(POPUP_ACTIVATE_DELAY_MS >= 0);
    assert!(POPUP_REMOVE_DELAY_MS > POPUP_ACTIVATE_DELAY_MS);
}

#[test]
fn selectors_match_page_contract() {
    assert_eq!(HEADING_SELECTOR, "h1");
    assert!(MEDIA_SELECTOR.contains(".grid-item img"));
    assert!(MEDIA_SELECTOR.contains(".grid-item video"));
    assert_eq!(VIEWER_SELECTOR, ".asset-viewer");
    assert_eq!(MODEL_ATTRIBUTE, "data-model");
}

#[test]
fn srgb_conversion_hits_known_points() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    // 0x33 = 0.2 in sRGB is roughly 0.0331 linear
    let [r, g, b] = hex_to_linear_rgb(BACKGROUND_SRGB);
    assert!((r - 0.0331).abs() < 1e-3, "r={r}");
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn srgb_conversion_is_monotonic() {
    let mut prev = srgb_to_linear(0.0);
    for i in 1..=255 {
        let v = srgb_to_linear(i as f32 / 255.0);
        assert!(v > prev, "not increasing at {i}");
        prev = v;
    }
}
