use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = RefCell<Option<Closure<dyn FnMut()>>>;

/// A `requestAnimationFrame` loop that can be stopped.
///
/// The loop keeps one outstanding frame request at a time and re-requests
/// after every frame. The frame closure only holds a weak reference to its
/// own slot, so dropping the handle (or calling [`RenderLoop::stop`]) ends
/// the loop and frees the closure.
pub struct RenderLoop {
    tick: Rc<TickSlot>,
    running: Rc<Cell<bool>>,
    in_frame: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl RenderLoop {
    pub fn start(mut on_frame: impl FnMut() + 'static) -> Self {
        let tick: Rc<TickSlot> = Rc::new(RefCell::new(None));
        let running = Rc::new(Cell::new(true));
        let in_frame = Rc::new(Cell::new(false));
        let raf_id = Rc::new(Cell::new(None));

        let weak_tick: Weak<TickSlot> = Rc::downgrade(&tick);
        let running_tick = running.clone();
        let in_frame_tick = in_frame.clone();
        let raf_tick = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_tick.set(None);
            if !running_tick.get() {
                return;
            }
            in_frame_tick.set(true);
            on_frame();
            in_frame_tick.set(false);
            if !running_tick.get() {
                return;
            }
            if let Some(slot) = weak_tick.upgrade() {
                raf_tick.set(request_frame(&slot));
            }
        }) as Box<dyn FnMut()>));

        raf_id.set(request_frame(&tick));
        Self {
            tick,
            running,
            in_frame,
            raf_id,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancel the pending frame. The closure is dropped right away unless
    /// this is called from inside the frame callback, in which case the loop
    /// just stops re-requesting and the closure goes with the handle.
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        if !self.in_frame.get() {
            self.tick.borrow_mut().take();
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(slot: &TickSlot) -> Option<i32> {
    let w = web::window()?;
    let guard = slot.borrow();
    let cb = guard.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}
