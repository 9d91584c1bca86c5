use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use crate::core::camera::backing_size;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// All elements matching `selector`, in document order. An invalid selector
/// matches nothing.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let list = match document.query_selector_all(selector) {
        Ok(l) => l,
        Err(e) => {
            log::error!("bad selector {:?}: {:?}", selector, e);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Run `f` once the document has been parsed.
pub fn on_document_ready(document: &web::Document, f: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let closure = Closure::once_into_js(f);
    _ = document.add_event_listener_with_callback("DOMContentLoaded", closure.unchecked_ref());
}

#[inline]
pub fn add_listener<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// One-shot `setTimeout`; returns the handle for [`clear_timeout`].
pub fn set_timeout(delay_ms: i32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web::window()?;
    let callback = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)
        .ok()
}

#[inline]
pub fn clear_timeout(handle: i32) {
    if let Some(w) = web::window() {
        w.clear_timeout_with_handle(handle);
    }
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

#[inline]
pub fn client_size(el: &web::Element) -> (u32, u32) {
    (el.client_width().max(0) as u32, el.client_height().max(0) as u32)
}

/// Size the canvas to `css_w` x `css_h` CSS pixels with a backing store scaled
/// by `devicePixelRatio`. Returns the backing size.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    css_w: u32,
    css_h: u32,
) -> (u32, u32) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", css_w));
    _ = style.set_property("height", &format!("{}px", css_h));
    let (w_px, h_px) = backing_size(css_w, css_h, device_pixel_ratio());
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}
