use crate::constants::{
    MEDIA_SELECTOR, POPUP_ACTIVE_CLASS, POPUP_CLASS, POPUP_ENTER_EVENT, POPUP_LEAVE_EVENT,
};
use crate::core::hover::HoverEffects;
use crate::core::{
    HoverEffect, HoverSession, MediaKind, PopupSpec, POPUP_ACTIVATE_DELAY_MS,
    POPUP_REMOVE_DELAY_MS,
};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Popup bookkeeping for one grid media element.
struct PopupSlot {
    media: web::HtmlElement,
    kind: MediaKind,
    session: HoverSession,
    popup: Option<web::Element>,
    removal_timer: Option<i32>,
}

/// Install hover listeners on every grid image/video. Returns how many
/// elements were wired.
pub fn wire_all(document: &web::Document) -> usize {
    let mut count = 0;
    for el in dom::query_all(document, MEDIA_SELECTOR) {
        let Some(kind) = MediaKind::from_tag(&el.tag_name()) else {
            continue;
        };
        let Ok(media) = el.dyn_into::<web::HtmlElement>() else {
            continue;
        };
        wire(media, kind);
        count += 1;
    }
    count
}

fn wire(media: web::HtmlElement, kind: MediaKind) {
    let target: web::EventTarget = media.clone().into();
    let slot = Rc::new(RefCell::new(PopupSlot {
        media,
        kind,
        session: HoverSession::new(),
        popup: None,
        removal_timer: None,
    }));

    let on_enter = slot.clone();
    dom::add_listener(&target, POPUP_ENTER_EVENT, move |_ev: web::MouseEvent| {
        let fx = on_enter.borrow_mut().session.enter();
        apply(&on_enter, fx);
    });

    let on_leave = slot;
    dom::add_listener(&target, POPUP_LEAVE_EVENT, move |_ev: web::MouseEvent| {
        let fx = on_leave.borrow_mut().session.leave();
        apply(&on_leave, fx);
    });
}

fn apply(slot: &Rc<RefCell<PopupSlot>>, effects: HoverEffects) {
    for fx in effects {
        match fx {
            HoverEffect::CreatePopup => {
                let mut s = slot.borrow_mut();
                match create_popup(&s.media, s.kind) {
                    Ok(el) => s.popup = Some(el),
                    Err(e) => log::error!("[popup] create failed: {:?}", e),
                }
            }
            HoverEffect::ScheduleActivate(token) => {
                let s = slot.clone();
                _ = dom::set_timeout(POPUP_ACTIVATE_DELAY_MS, move || {
                    let fx = s.borrow_mut().session.activate_due(token);
                    apply(&s, fx);
                });
            }
            HoverEffect::Activate => {
                if let Some(p) = &slot.borrow().popup {
                    _ = p.class_list().add_1(POPUP_ACTIVE_CLASS);
                }
            }
            HoverEffect::Deactivate => {
                if let Some(p) = &slot.borrow().popup {
                    _ = p.class_list().remove_1(POPUP_ACTIVE_CLASS);
                }
            }
            HoverEffect::HideOriginal => set_opacity(&slot.borrow().media, "0"),
            HoverEffect::ShowOriginal => set_opacity(&slot.borrow().media, "1"),
            HoverEffect::ScheduleRemoval(token) => {
                let s = slot.clone();
                let handle = dom::set_timeout(POPUP_REMOVE_DELAY_MS, move || {
                    let fx = s.borrow_mut().session.removal_due(token);
                    apply(&s, fx);
                });
                slot.borrow_mut().removal_timer = handle;
            }
            HoverEffect::CancelRemoval => {
                if let Some(h) = slot.borrow_mut().removal_timer.take() {
                    dom::clear_timeout(h);
                }
            }
            HoverEffect::RemovePopup => {
                let mut s = slot.borrow_mut();
                s.removal_timer = None;
                if let Some(p) = s.popup.take() {
                    p.remove();
                }
            }
        }
    }
}

fn set_opacity(media: &web::HtmlElement, value: &str) {
    _ = media.style().set_property("opacity", value);
}

fn popup_spec(media: &web::HtmlElement, kind: MediaKind) -> PopupSpec {
    match kind {
        MediaKind::Image => match media.dyn_ref::<web::HtmlImageElement>() {
            Some(img) => PopupSpec::image(&img.src(), &img.alt()),
            None => PopupSpec {
                kind,
                src: None,
                alt: None,
            },
        },
        MediaKind::Video => {
            let current = media
                .dyn_ref::<web::HtmlMediaElement>()
                .map(|m| m.current_src())
                .unwrap_or_default();
            let nested = media
                .query_selector("source")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<web::HtmlSourceElement>().ok())
                .map(|s| s.src());
            PopupSpec::video(&current, nested.as_deref())
        }
    }
}

fn create_popup(media: &web::HtmlElement, kind: MediaKind) -> Result<web::Element, JsValue> {
    let document = media
        .owner_document()
        .ok_or_else(|| JsValue::from_str("media element has no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let spec = popup_spec(media, kind);

    let el: web::Element = match spec.kind {
        MediaKind::Image => {
            let img = document
                .create_element("img")?
                .dyn_into::<web::HtmlImageElement>()?;
            if let Some(src) = &spec.src {
                img.set_src(src);
            }
            if let Some(alt) = &spec.alt {
                img.set_alt(alt);
            }
            img.into()
        }
        MediaKind::Video => {
            let video = document
                .create_element("video")?
                .dyn_into::<web::HtmlVideoElement>()?;
            match &spec.src {
                Some(src) => video.set_src(src),
                None => log::debug!("[popup] video has no playable source"),
            }
            if spec.autoplays() {
                video.set_autoplay(true);
                video.set_loop(true);
                video.set_muted(true);
                video.set_attribute("playsinline", "")?;
            }
            video.into()
        }
    };
    el.class_list().add_1(POPUP_CLASS)?;
    body.append_child(&el)?;
    Ok(el)
}
