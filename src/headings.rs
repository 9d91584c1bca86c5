use crate::constants::{GLYPH_TAG, HEADING_SELECTOR};
use crate::core::glyphs::{glyph_style, glyphs, Glyph};
use crate::dom;
use web_sys as web;

/// Wrap every character of every heading for staggered CSS animation.
/// Returns how many headings were rewritten.
pub fn animate_all(document: &web::Document) -> usize {
    let mut count = 0;
    for heading in dom::query_all(document, HEADING_SELECTOR) {
        match animate(document, &heading) {
            Ok(()) => count += 1,
            Err(e) => log::error!("[heading] rewrite failed: {:?}", e),
        }
    }
    count
}

fn animate(document: &web::Document, heading: &web::Element) -> Result<(), wasm_bindgen::JsValue> {
    let text = heading.text_content().unwrap_or_default();
    let fragment = document.create_document_fragment();
    for glyph in glyphs(&text) {
        match glyph {
            Glyph::Space => {
                fragment.append_child(&document.create_text_node(" "))?;
            }
            Glyph::Char { index, ch } => {
                let span = document.create_element(GLYPH_TAG)?;
                span.set_attribute("style", &glyph_style(index))?;
                span.set_text_content(Some(&ch.to_string()));
                fragment.append_child(&span)?;
            }
        }
    }
    heading.set_text_content(None);
    heading.append_child(&fragment)?;
    Ok(())
}
