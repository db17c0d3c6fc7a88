//! JavaScript bindings for hosting the pacer on a page without Yew.
//!
//! ```js
//! import init, { BreathingPacer } from "./breath_pacer.js";
//! await init();
//! const pacer = new BreathingPacer((event) => {
//!     if (event.kind === "snapshot") draw(event.radius, event.phase);
//! });
//! pacer.start("5", "40", "120");
//! ```

use crate::scheduler::AnimationFrameScheduler;
use crate::{
    BreathingEngine, ButtonState, PacerConfig, PacerError, PacerInputs, PresentationSink, Snapshot,
};
use js_sys::Function;
use log::error;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

/// Event objects handed to the JS listener.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum PacerEvent<'a> {
    Snapshot(&'a Snapshot),
    ValidationError { error: PacerError, message: String },
    Buttons(ButtonState),
}

/// Forwards engine output to a single JS function.
struct JsSink {
    listener: Function,
}

impl JsSink {
    fn emit(&self, event: &PacerEvent) {
        let value = match serde_wasm_bindgen::to_value(event) {
            Ok(value) => value,
            Err(err) => {
                error!("Failed to serialize pacer event: {}", err);
                return;
            }
        };
        if let Err(err) = self.listener.call1(&JsValue::NULL, &value) {
            error!("Pacer listener threw: {:?}", err);
        }
    }
}

impl PresentationSink for JsSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.emit(&PacerEvent::Snapshot(snapshot));
    }

    fn on_validation_error(&mut self, error: PacerError) {
        self.emit(&PacerEvent::ValidationError {
            error,
            message: error.to_string(),
        });
    }

    fn on_button_state_change(&mut self, buttons: ButtonState) {
        self.emit(&PacerEvent::Buttons(buttons));
    }
}

type JsEngine = BreathingEngine<AnimationFrameScheduler, JsSink>;

#[wasm_bindgen]
pub struct BreathingPacer {
    engine: Rc<RefCell<JsEngine>>,
}

#[wasm_bindgen]
impl BreathingPacer {
    #[wasm_bindgen(constructor)]
    pub fn new(listener: Function) -> BreathingPacer {
        console_error_panic_hook::set_once();
        let engine = Rc::new_cyclic(|weak: &Weak<RefCell<JsEngine>>| {
            let weak = weak.clone();
            let scheduler = AnimationFrameScheduler::new(move |timestamp| {
                if let Some(engine) = weak.upgrade() {
                    match engine.try_borrow_mut() {
                        Ok(mut engine) => engine.on_tick(timestamp),
                        Err(_) => error!("Frame arrived while the pacer was busy"),
                    }
                }
            });
            RefCell::new(BreathingEngine::new(scheduler, JsSink { listener }))
        });
        BreathingPacer { engine }
    }

    /// Throws the validation message if the inputs are rejected.
    pub fn start(
        &self,
        duration: &str,
        start_radius: &str,
        end_radius: &str,
    ) -> Result<(), JsValue> {
        let inputs = PacerInputs::new(duration, start_radius, end_radius);
        self.with_engine(|engine| engine.start(&inputs))?
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn stop(&self) -> Result<(), JsValue> {
        self.with_engine(|engine| engine.stop())
    }

    pub fn reset(
        &self,
        duration: &str,
        start_radius: &str,
        end_radius: &str,
    ) -> Result<(), JsValue> {
        let inputs = PacerInputs::new(duration, start_radius, end_radius);
        self.with_engine(|engine| engine.reset(&inputs))
    }

    /// False while the pacer is busy, i.e. when read from inside a
    /// `start`/`stop`/`reset` notification.
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        read_unless_busy(&*self.engine, false, |engine| engine.is_running())
    }

    /// Current phase name, e.g. `"BreathingIn"`; undefined while busy.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> JsValue {
        read_unless_busy(&*self.engine, JsValue::UNDEFINED, |engine| {
            serde_wasm_bindgen::to_value(&engine.phase()).unwrap_or(JsValue::UNDEFINED)
        })
    }

    /// Zero while busy.
    #[wasm_bindgen(getter, js_name = cycleCount)]
    pub fn cycle_count(&self) -> u32 {
        read_unless_busy(&*self.engine, 0, |engine| engine.cycle_count())
    }
}

impl BreathingPacer {
    fn with_engine<R>(&self, f: impl FnOnce(&mut JsEngine) -> R) -> Result<R, JsValue> {
        let mut engine = self
            .engine
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("pacer is busy; do not call it from its listener"))?;
        Ok(f(&mut engine))
    }
}

/// Read through `cell`, or return `busy` when it is mutably borrowed.
fn read_unless_busy<T, R>(cell: &RefCell<T>, busy: R, read: impl FnOnce(&T) -> R) -> R {
    match cell.try_borrow() {
        Ok(value) => read(&value),
        Err(_) => busy,
    }
}

/// Pure snapshot computation, for hosts that drive their own clock.
#[wasm_bindgen(js_name = snapshotAt)]
pub fn snapshot_at(
    duration_secs: f64,
    start_radius: u32,
    end_radius: u32,
    elapsed_ms: f64,
) -> Result<JsValue, JsValue> {
    let config = PacerConfig::new(duration_secs, start_radius, end_radius)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    serde_wasm_bindgen::to_value(&config.snapshot_at(elapsed_ms)).map_err(JsValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Phase;
    use serde_json::json;

    #[test]
    fn snapshot_event_is_tagged_and_camel_case() {
        let snapshot = Snapshot {
            radius: 80.0,
            phase: Phase::BreathingOut,
            countdown_seconds: 1.5,
            cycle_count: 2,
        };
        let value = serde_json::to_value(PacerEvent::Snapshot(&snapshot)).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "snapshot",
                "radius": 80.0,
                "phase": "BreathingOut",
                "countdownSeconds": 1.5,
                "cycleCount": 2,
            })
        );
    }

    #[test]
    fn validation_event_carries_kind_and_message() {
        let error = PacerError::InvalidRadii;
        let value = serde_json::to_value(PacerEvent::ValidationError {
            error,
            message: error.to_string(),
        })
        .unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "validationError",
                "error": "InvalidRadii",
                "message": "Start radius must be smaller than end radius",
            })
        );
    }

    #[test]
    fn buttons_event_is_tagged_and_camel_case() {
        let value =
            serde_json::to_value(PacerEvent::Buttons(ButtonState::for_phase(Phase::Paused)))
                .unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "buttons",
                "startEnabled": false,
                "stopEnabled": false,
                "radiusInputsEnabled": true,
            })
        );
    }

    #[test]
    fn busy_engine_reads_as_not_running() {
        let cell = RefCell::new(true);
        assert!(read_unless_busy(&cell, false, |running| *running));

        let _guard = cell.borrow_mut();
        assert!(!read_unless_busy(&cell, false, |running| *running));
    }
}
