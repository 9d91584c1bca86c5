#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod fetch;
mod frame;
mod headings;
mod input;
mod popup;
mod render;
mod viewer;

thread_local! {
    static VIEWERS: RefCell<Vec<viewer::ViewerHandle>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showcase-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    let ready_doc = document.clone();
    dom::on_document_ready(&document, move || init(&ready_doc));
    Ok(())
}

fn init(document: &web::Document) {
    let headings = headings::animate_all(document);
    log::info!("[heading] animated {} heading(s)", headings);

    let media = popup::wire_all(document);
    log::info!("[popup] wired {} media element(s)", media);

    let mounted = viewer::mount_all(document);
    log::info!("[viewer] mounted {} viewer(s)", mounted.len());
    VIEWERS.with(|v| v.borrow_mut().extend(mounted));
}

/// Stop every mounted viewer's render loop. Safe to call more than once.
#[wasm_bindgen]
pub fn dispose_viewers() {
    let handles = VIEWERS.with(|v| std::mem::take(&mut *v.borrow_mut()));
    for h in &handles {
        h.dispose();
    }
}
