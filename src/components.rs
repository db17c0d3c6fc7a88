//! Pure Yew view components for the breathing pacer UI.
//!
//! These components render from props only; all state lives in the engine
//! and the view reducer.

use breath_pacer::config::{EXHALE_COLOR, EXHALE_GLOW, INHALE_COLOR, INHALE_GLOW};
use breath_pacer::utils::diameter_px;
use breath_pacer::{ButtonState, Phase};
use yew::prelude::*;

/// Fill and glow of the breathing circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleStyle {
    pub background: &'static str,
    pub glow: Option<&'static str>,
}

/// Green while growing, red while shrinking. A paused circle keeps the color
/// of `last_leg`.
pub fn circle_style(phase: Phase, last_leg: Phase) -> CircleStyle {
    let leg = if phase == Phase::Paused { last_leg } else { phase };
    match leg {
        Phase::BreathingIn => CircleStyle {
            background: INHALE_COLOR,
            glow: Some(INHALE_GLOW),
        },
        Phase::BreathingOut => CircleStyle {
            background: EXHALE_COLOR,
            glow: Some(EXHALE_GLOW),
        },
        Phase::Idle | Phase::Paused => CircleStyle {
            background: INHALE_COLOR,
            glow: None,
        },
    }
}

fn sized_css(radius: f64) -> String {
    let size = diameter_px(radius);
    format!("width: {size}; height: {size};")
}

fn circle_css(radius: f64, style: CircleStyle) -> String {
    let mut css = format!("{} background: {};", sized_css(radius), style.background);
    if let Some(glow) = style.glow {
        css.push_str(&format!(" box-shadow: {};", glow));
    }
    css
}

/// Breathing circle drawn over the start and end reference circumferences.
#[derive(Properties, PartialEq)]
pub struct BreathingCircleProps {
    pub radius: f64,
    pub start_radius: u32,
    pub end_radius: u32,
    pub style: CircleStyle,
}

#[function_component(BreathingCircle)]
pub fn breathing_circle(props: &BreathingCircleProps) -> Html {
    html! {
        <div class="circle-container">
            <div class="reference-circle end-circle"
                style={sized_css(f64::from(props.end_radius))} />
            <div class="reference-circle start-circle"
                style={sized_css(f64::from(props.start_radius))} />
            <div id="breathingCircle" class="breathing-circle"
                style={circle_css(props.radius, props.style)} />
        </div>
    }
}

/// Labelled numeric input.
#[derive(Properties, PartialEq)]
pub struct NumberFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub min: AttrValue,
    pub step: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    pub oninput: Callback<InputEvent>,
    #[prop_or_default]
    pub onkeypress: Option<Callback<KeyboardEvent>>,
}

#[function_component(NumberField)]
pub fn number_field(props: &NumberFieldProps) -> Html {
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <input type="number"
                id={props.id.clone()}
                min={props.min.clone()}
                step={props.step.clone()}
                value={props.value.clone()}
                disabled={props.disabled}
                oninput={props.oninput.clone()}
                onkeypress={props.onkeypress.clone()}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ControlButtonsProps {
    pub buttons: ButtonState,
    pub on_start: Callback<MouseEvent>,
    pub on_stop: Callback<MouseEvent>,
    pub on_reset: Callback<MouseEvent>,
}

#[function_component(ControlButtons)]
pub fn control_buttons(props: &ControlButtonsProps) -> Html {
    html! {
        <div class="controls">
            <button id="startBtn"
                disabled={!props.buttons.start_enabled}
                onclick={props.on_start.clone()}>{ "Start" }</button>
            <button id="stopBtn"
                disabled={!props.buttons.stop_enabled}
                onclick={props.on_stop.clone()}>{ "Stop" }</button>
            <button id="resetBtn" onclick={props.on_reset.clone()}>{ "Reset" }</button>
        </div>
    }
}

/// Instruction, countdown, status line and cycle counter.
#[derive(Properties, PartialEq)]
pub struct SessionStatsProps {
    pub phase: Phase,
    pub countdown: String,
    pub cycle_count: u32,
}

#[function_component(SessionStats)]
pub fn session_stats(props: &SessionStatsProps) -> Html {
    html! {
        <div class="session-stats">
            <div id="instruction" class="instruction">{ props.phase.instruction() }</div>
            <div id="timeDisplay" class="time-display">{ props.countdown.clone() }</div>
            <div id="status" class={classes!("status", props.phase.status_class())}>
                { props.phase.status_message() }
            </div>
            <div class="cycle-counter">
                { "Cycles completed: " }
                <span id="cycleCount">{ props.cycle_count }</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_circle_keeps_exhale_color() {
        let style = circle_style(Phase::Paused, Phase::BreathingOut);
        assert_eq!(style.background, EXHALE_COLOR);
        assert_eq!(style.glow, Some(EXHALE_GLOW));
    }

    #[test]
    fn idle_circle_is_plain_green() {
        let style = circle_style(Phase::Idle, Phase::BreathingOut);
        assert_eq!(style.background, INHALE_COLOR);
        assert_eq!(style.glow, None);
    }

    #[test]
    fn circle_css_sets_diameter_and_glow() {
        let css = circle_css(40.0, circle_style(Phase::BreathingIn, Phase::Idle));
        assert_eq!(
            css,
            "width: 80px; height: 80px; background: #4CAF50; box-shadow: 0 0 20px rgba(76, 175, 80, 0.5);"
        );
    }
}
