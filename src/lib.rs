//! Breathing pacer core: configuration, phase math and the seams between the
//! frame-driven engine and whatever hosts it (browser, JS page, tests).

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod engine;
pub mod js_api;
pub mod logger;
pub mod scheduler;
pub mod utils;

pub use engine::BreathingEngine;

use config::{
    DEFAULT_DURATION_SECS, DEFAULT_END_RADIUS, DEFAULT_START_RADIUS, HALF_CYCLE_MS_PER_SEC,
    MAX_DURATION_SECS, MIN_DURATION_SECS, MIN_RADIUS,
};
use utils::{parse_leading_float, parse_radius};

/// Where the pacer is in its run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    BreathingIn,
    BreathingOut,
    Paused,
}

impl Phase {
    /// Large instruction text shown above the circle.
    pub fn instruction(self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::BreathingIn => "Breathe IN",
            Phase::BreathingOut => "Breathe OUT",
            Phase::Paused => "Paused",
        }
    }

    pub fn status_message(self) -> &'static str {
        match self {
            Phase::Idle => "Ready to begin breathing exercise",
            Phase::BreathingIn => "Breathing in...",
            Phase::BreathingOut => "Breathing out...",
            Phase::Paused => "Breathing stopped",
        }
    }

    /// Extra CSS class for the status line, if the phase has one.
    pub fn status_class(self) -> Option<&'static str> {
        match self {
            Phase::BreathingIn => Some("breathing-in"),
            Phase::BreathingOut => Some("breathing-out"),
            Phase::Idle | Phase::Paused => None,
        }
    }

    /// True for the two legs of a running cycle.
    pub fn is_breathing(self) -> bool {
        matches!(self, Phase::BreathingIn | Phase::BreathingOut)
    }
}

// Errors raised when a run is started with bad input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacerError {
    /// Duration missing, non-numeric, zero, or outside the allowed range.
    InvalidDuration,
    /// Radius missing, non-positive, or start not smaller than end.
    InvalidRadii,
}

impl fmt::Display for PacerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacerError::InvalidDuration => write!(
                f,
                "Please enter a valid time (minimum {} seconds, maximum {} seconds)",
                MIN_DURATION_SECS, MAX_DURATION_SECS
            ),
            PacerError::InvalidRadii => write!(f, "Start radius must be smaller than end radius"),
        }
    }
}

impl std::error::Error for PacerError {}

/// Validated settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacerConfig {
    cycle_duration_secs: f64,
    start_radius: u32,
    end_radius: u32,
}

impl PacerConfig {
    pub fn new(
        cycle_duration_secs: f64,
        start_radius: u32,
        end_radius: u32,
    ) -> Result<Self, PacerError> {
        if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&cycle_duration_secs) {
            return Err(PacerError::InvalidDuration);
        }
        if start_radius < MIN_RADIUS || start_radius >= end_radius {
            return Err(PacerError::InvalidRadii);
        }
        Ok(Self {
            cycle_duration_secs,
            start_radius,
            end_radius,
        })
    }

    pub fn cycle_duration_secs(&self) -> f64 {
        self.cycle_duration_secs
    }

    pub fn start_radius(&self) -> u32 {
        self.start_radius
    }

    pub fn end_radius(&self) -> u32 {
        self.end_radius
    }

    /// Length of one leg (inhale or exhale) in milliseconds.
    pub fn half_cycle_ms(&self) -> f64 {
        self.cycle_duration_secs * HALF_CYCLE_MS_PER_SEC
    }

    /// Length of one inhale+exhale pair in milliseconds.
    pub fn full_cycle_ms(&self) -> f64 {
        2.0 * self.half_cycle_ms()
    }

    /// Number of fully finished cycles after `elapsed_ms`.
    pub fn completed_cycles(&self, elapsed_ms: f64) -> u32 {
        (elapsed_ms.max(0.0) / self.full_cycle_ms()).floor() as u32
    }

    /// 1-indexed number of the cycle in progress after `elapsed_ms`.
    pub fn cycle_number(&self, elapsed_ms: f64) -> u32 {
        self.completed_cycles(elapsed_ms).saturating_add(1)
    }

    /// Snapshot shown the moment a run begins, before any frame arrives.
    pub fn initial_snapshot(&self) -> Snapshot {
        Snapshot {
            radius: f64::from(self.start_radius),
            phase: Phase::BreathingIn,
            countdown_seconds: self.half_cycle_ms() / 1000.0,
            cycle_count: 0,
        }
    }

    /// Compute what the circle looks like `elapsed_ms` into a run.
    ///
    /// The radius follows a triangle wave: a linear ramp from start to end
    /// radius over the first half-cycle, then the same ramp reflected back.
    /// `cycle_count` is the 1-indexed cycle in progress; the engine keeps its
    /// own monotonic counter on top of this.
    ///
    /// Negative elapsed times are treated as zero.
    pub fn snapshot_at(&self, elapsed_ms: f64) -> Snapshot {
        let elapsed = elapsed_ms.max(0.0);
        let half = self.half_cycle_ms();
        let full = self.full_cycle_ms();

        let progress = (elapsed % full) / half;
        let breathing_in = progress < 1.0;
        let phase_progress = if breathing_in { progress } else { 2.0 - progress };

        let span = f64::from(self.end_radius - self.start_radius);
        let radius = f64::from(self.start_radius) + span * phase_progress;

        let time_left_ms = half - (elapsed % half);

        Snapshot {
            radius,
            phase: if breathing_in {
                Phase::BreathingIn
            } else {
                Phase::BreathingOut
            },
            countdown_seconds: time_left_ms / 1000.0,
            cycle_count: self.cycle_number(elapsed),
        }
    }
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub radius: f64,
    pub phase: Phase,
    pub countdown_seconds: f64,
    pub cycle_count: u32,
}

/// Which controls are usable given the run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub radius_inputs_enabled: bool,
}

impl ButtonState {
    pub fn for_phase(phase: Phase) -> Self {
        let running = phase.is_breathing();
        Self {
            // A paused run has no resume; only reset re-enables start.
            start_enabled: phase == Phase::Idle,
            stop_enabled: running,
            radius_inputs_enabled: !running,
        }
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::for_phase(Phase::Idle)
    }
}

/// Raw text of the three input fields, as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacerInputs {
    pub duration: String,
    pub start_radius: String,
    pub end_radius: String,
}

impl Default for PacerInputs {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_SECS.to_string(),
            start_radius: DEFAULT_START_RADIUS.to_string(),
            end_radius: DEFAULT_END_RADIUS.to_string(),
        }
    }
}

impl PacerInputs {
    pub fn new(
        duration: impl Into<String>,
        start_radius: impl Into<String>,
        end_radius: impl Into<String>,
    ) -> Self {
        Self {
            duration: duration.into(),
            start_radius: start_radius.into(),
            end_radius: end_radius.into(),
        }
    }

    /// Parse and validate the fields into a run configuration.
    ///
    /// The duration is checked first, so input that is wrong on both counts
    /// reports `InvalidDuration`.
    pub fn to_config(&self) -> Result<PacerConfig, PacerError> {
        let duration = parse_leading_float(&self.duration)
            .filter(|d| *d != 0.0)
            .ok_or(PacerError::InvalidDuration)?;
        if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&duration) {
            return Err(PacerError::InvalidDuration);
        }

        let start = parse_radius(&self.start_radius).ok_or(PacerError::InvalidRadii)?;
        let end = parse_radius(&self.end_radius).ok_or(PacerError::InvalidRadii)?;
        PacerConfig::new(duration, start, end)
    }

    /// Radii for the reference circles and the idle preview; unreadable
    /// fields fall back to the defaults.
    pub fn preview_radii(&self) -> (u32, u32) {
        (
            parse_radius(&self.start_radius).unwrap_or(DEFAULT_START_RADIUS),
            parse_radius(&self.end_radius).unwrap_or(DEFAULT_END_RADIUS),
        )
    }

    /// Duration shown while idle; unreadable or zero falls back to the default.
    pub fn preview_duration_secs(&self) -> f64 {
        parse_leading_float(&self.duration)
            .filter(|d| *d != 0.0)
            .unwrap_or(DEFAULT_DURATION_SECS)
    }
}

/// Host primitive that delivers one callback per display frame.
///
/// Implementations call the engine's `on_tick` with a millisecond timestamp
/// on the same clock as `now_ms` when a requested frame fires.
pub trait FrameScheduler {
    type Handle;

    fn now_ms(&self) -> f64;
    fn request_frame(&mut self) -> Self::Handle;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Receives everything the engine wants shown.
pub trait PresentationSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot);
    fn on_validation_error(&mut self, error: PacerError);
    fn on_button_state_change(&mut self, buttons: ButtonState);
}
