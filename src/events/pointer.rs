use crate::dom;
use crate::input;
use crate::viewer::Viewer;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Bind orbit controls of `viewer` to pointer events on its canvas.
pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, viewer: Rc<RefCell<Viewer>>) {
    wire_pointerdown(canvas, viewer.clone());
    wire_pointermove(canvas, viewer.clone());
    wire_pointer_end(canvas, viewer.clone(), "pointerup");
    wire_pointer_end(canvas, viewer.clone(), "pointercancel");
    wire_wheel(canvas, viewer);
    wire_contextmenu(canvas);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, viewer: Rc<RefCell<Viewer>>) {
    let el: web::Element = canvas.clone().into();
    dom::add_listener(canvas.as_ref(), "pointerdown", move |ev: web::PointerEvent| {
        if !input::is_rotate_button(&ev) {
            return;
        }
        let pos = input::pointer_element_px(&ev, &el);
        let mut v = viewer.borrow_mut();
        if let Some(event) = v.state.controls.begin_drag(ev.pointer_id(), pos) {
            v.state.on_control_event(event);
            _ = el.set_pointer_capture(ev.pointer_id());
            log::debug!("[viewer] drag start pointer={}", ev.pointer_id());
        }
        ev.prevent_default();
    });
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, viewer: Rc<RefCell<Viewer>>) {
    let el: web::Element = canvas.clone().into();
    dom::add_listener(canvas.as_ref(), "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_element_px(&ev, &el);
        let height = input::element_css_height(&el);
        let mut v = viewer.borrow_mut();
        if let Some(event) = v.state.controls.drag_to(ev.pointer_id(), pos, height) {
            v.state.on_control_event(event);
        }
    });
}

fn wire_pointer_end(canvas: &web::HtmlCanvasElement, viewer: Rc<RefCell<Viewer>>, name: &str) {
    let el: web::Element = canvas.clone().into();
    let end = move |ev: web::PointerEvent| {
        let mut v = viewer.borrow_mut();
        if let Some(event) = v.state.controls.end_drag(ev.pointer_id()) {
            v.state.on_control_event(event);
            _ = el.release_pointer_capture(ev.pointer_id());
            log::debug!("[viewer] drag end pointer={}", ev.pointer_id());
        }
    };
    dom::add_listener(canvas.as_ref(), name, end);
}

// Zoom is off, so the page keeps scrolling over the viewer.
fn wire_wheel(canvas: &web::HtmlCanvasElement, viewer: Rc<RefCell<Viewer>>) {
    dom::add_listener(canvas.as_ref(), "wheel", move |ev: web::WheelEvent| {
        let mut v = viewer.borrow_mut();
        if let Some(event) = v.state.controls.wheel(ev.delta_y() as f32) {
            v.state.on_control_event(event);
            ev.prevent_default();
        }
    });
}

fn wire_contextmenu(canvas: &web::HtmlCanvasElement) {
    dom::add_listener(canvas.as_ref(), "contextmenu", |ev: web::MouseEvent| {
        ev.prevent_default();
    });
}
