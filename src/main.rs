//! Main module for the breathing pacer application using Yew.
//! Wires the input fields and control buttons to the frame-driven engine.

use breath_pacer::config::{
    DEFAULT_DURATION_SECS, DEFAULT_END_RADIUS, DEFAULT_START_RADIUS, DURATION_STEP_SECS,
    LOG_LEVEL, MIN_DURATION_SECS, MIN_RADIUS,
};
use breath_pacer::utils::{format_countdown, format_idle_countdown};
use breath_pacer::{logger, PacerInputs, Phase};
use log::debug;
use yew::prelude::*;

mod components;
mod hooks;

use components::{circle_style, BreathingCircle, ControlButtons, NumberField, SessionStats};
use hooks::{use_input_field, use_pacer};

/// Primary application component wiring inputs, engine and view.
#[function_component(App)]
fn app() -> Html {
    let duration = use_input_field(DEFAULT_DURATION_SECS.to_string());
    let start_radius = use_input_field(DEFAULT_START_RADIUS.to_string());
    let end_radius = use_input_field(DEFAULT_END_RADIUS.to_string());
    let (view, engine) = use_pacer();

    let inputs = PacerInputs::new(
        duration.text.clone(),
        start_radius.text.clone(),
        end_radius.text.clone(),
    );
    let (preview_start, preview_end) = inputs.preview_radii();

    let start = {
        let engine = engine.clone();
        let inputs = inputs.clone();
        Callback::from(move |()| {
            if let Err(err) = engine.borrow_mut().start(&inputs) {
                debug!("Start rejected: {}", err);
            }
        })
    };
    let on_start = start.reform(|_: MouseEvent| ());
    // Enter in the cycle-time field starts the exercise
    let on_duration_keypress = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            start.emit(());
        }
    });
    let on_stop = {
        let engine = engine.clone();
        Callback::from(move |_: MouseEvent| engine.borrow_mut().stop())
    };
    let on_reset = {
        let engine = engine.clone();
        let inputs = inputs.clone();
        Callback::from(move |_: MouseEvent| engine.borrow_mut().reset(&inputs))
    };

    // While idle the circle and countdown preview the current fields.
    let active = view.snapshot.filter(|s| s.phase != Phase::Idle);
    let phase = view.snapshot.map_or(Phase::Idle, |s| s.phase);
    let radius = active.map_or(f64::from(preview_start), |s| s.radius);
    let countdown = match active {
        Some(snapshot) => format_countdown(snapshot.countdown_seconds),
        None => format_idle_countdown(&duration.text, DEFAULT_DURATION_SECS),
    };
    let cycle_count = view.snapshot.map_or(0, |s| s.cycle_count);
    let radius_disabled = !view.buttons.radius_inputs_enabled;

    html! {
        <div class="container">
            <h1>{ "Breathing Exercise" }</h1>
            <div class="input-section">
                <NumberField
                    id="timeInput"
                    label="Breathing cycle time (seconds):"
                    value={duration.text.clone()}
                    min={MIN_DURATION_SECS.to_string()}
                    step={DURATION_STEP_SECS.to_string()}
                    oninput={duration.on_input.clone()}
                    onkeypress={on_duration_keypress}
                />
                <NumberField
                    id="startRadius"
                    label="Start radius (px):"
                    value={start_radius.text.clone()}
                    min={MIN_RADIUS.to_string()}
                    step="1"
                    disabled={radius_disabled}
                    oninput={start_radius.on_input.clone()}
                />
                <NumberField
                    id="endRadius"
                    label="End radius (px):"
                    value={end_radius.text.clone()}
                    min={MIN_RADIUS.to_string()}
                    step="1"
                    disabled={radius_disabled}
                    oninput={end_radius.on_input.clone()}
                />
            </div>
            <ControlButtons buttons={view.buttons} {on_start} {on_stop} {on_reset} />
            <BreathingCircle
                {radius}
                start_radius={preview_start}
                end_radius={preview_end}
                style={circle_style(phase, view.last_leg)}
            />
            <SessionStats {phase} {countdown} {cycle_count} />
        </div>
    }
}

/// Entry point: installs logging and the panic hook, then mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    logger::init(LOG_LEVEL);
    yew::Renderer::<App>::new().render();
}
