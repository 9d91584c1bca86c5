use glam::Vec2;
use web_sys as web;

// ---------------- Pointer helpers ----------------

/// Pointer position relative to the element's top-left corner, CSS pixels.
#[inline]
pub fn pointer_element_px(ev: &web::PointerEvent, el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Element height in CSS pixels; the orbit rotation scale.
#[inline]
pub fn element_css_height(el: &web::Element) -> f32 {
    el.client_height().max(0) as f32
}

/// Only the primary (left) mouse button rotates; touch and pen always do.
#[inline]
pub fn is_rotate_button(ev: &web::PointerEvent) -> bool {
    ev.pointer_type() != "mouse" || ev.button() == 0
}
