//! `requestAnimationFrame` loop with cancellation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::WebError;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A self-rescheduling animation-frame callback.
///
/// The callback re-requests itself after every frame while active. Stopping
/// cancels the outstanding request, so no further frame touches the game.
/// Dropping the loop stops it and releases the closure.
pub struct FrameLoop {
    window: Window,
    active: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, WebError> {
    Ok(window.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

impl FrameLoop {
    /// Schedule `on_frame` on every animation frame, with the frame timestamp
    /// in milliseconds.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let active = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let closure = {
            let (active, handle, callback, window) =
                (active.clone(), handle.clone(), callback.clone(), window.clone());
            FrameCallback::new(move |now: f64| {
                handle.set(None);
                if !active.get() {
                    return;
                }
                on_frame(now);
                if !active.get() {
                    return;
                }
                if let Some(cb) = callback.borrow().as_ref() {
                    match request_frame(&window, cb) {
                        Ok(id) => handle.set(Some(id)),
                        Err(err) => log::error!("frame loop halted: {err}"),
                    }
                }
            })
        };

        handle.set(Some(request_frame(&window, &closure)?));
        *callback.borrow_mut() = Some(closure);

        Ok(Self {
            window,
            active,
            handle,
            callback,
        })
    }

    /// Cancel the pending frame. Idempotent.
    pub fn stop(&self) {
        self.active.set(false);
        if let Some(id) = self.handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancel_animation_frame failed: {err:?}");
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        // The closure holds an Rc to its own slot; taking it breaks the cycle.
        self.callback.borrow_mut().take();
    }
}
