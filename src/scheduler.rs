//! Browser frame scheduler built on `requestAnimationFrame`.

use crate::FrameScheduler;
use log::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Delivers display-refresh callbacks through one long-lived JS closure.
///
/// The closure is created once and handed to `requestAnimationFrame` on every
/// request, so nothing is allocated per frame. Whoever owns the scheduler must
/// cancel any outstanding request before dropping it; `BreathingEngine` does
/// this in its `Drop`.
pub struct AnimationFrameScheduler {
    on_frame: Closure<dyn FnMut(f64)>,
}

impl AnimationFrameScheduler {
    pub fn new(on_frame: impl FnMut(f64) + 'static) -> Self {
        Self {
            on_frame: Closure::<dyn FnMut(f64)>::new(on_frame),
        }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    /// `requestAnimationFrame` request id.
    type Handle = i32;

    fn now_ms(&self) -> f64 {
        match gloo_utils::window().performance() {
            Some(performance) => performance.now(),
            None => {
                error!("window.performance is unavailable, frame timing will be off");
                0.0
            }
        }
    }

    fn request_frame(&mut self) -> i32 {
        gloo_utils::window()
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .unwrap_or_else(|err| {
                error!("requestAnimationFrame failed: {:?}", err);
                0
            })
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = gloo_utils::window().cancel_animation_frame(handle) {
            error!("cancelAnimationFrame({}) failed: {:?}", handle, err);
        }
    }
}
