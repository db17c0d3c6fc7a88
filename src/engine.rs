//! Run-state machine driven by host frame callbacks.

use crate::{
    ButtonState, FrameScheduler, PacerConfig, PacerError, PacerInputs, Phase, PresentationSink,
    Snapshot,
};
use log::{debug, info, trace, warn};

/// Owns the run state and turns frame timestamps into snapshots.
///
/// The engine never loops on its own: every `on_tick` requests exactly one
/// more frame from the scheduler while running, and `stop`/`reset` cancel
/// the outstanding request before returning.
pub struct BreathingEngine<S: FrameScheduler, P: PresentationSink> {
    scheduler: S,
    sink: P,
    config: Option<PacerConfig>,
    phase: Phase,
    running: bool,
    start_timestamp: f64,
    cycle_count: u32,
    last_snapshot: Option<Snapshot>,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler, P: PresentationSink> BreathingEngine<S, P> {
    pub fn new(scheduler: S, sink: P) -> Self {
        Self {
            scheduler,
            sink,
            config: None,
            phase: Phase::Idle,
            running: false,
            start_timestamp: 0.0,
            cycle_count: 0,
            last_snapshot: None,
            pending: None,
        }
    }

    /// Validate the inputs and begin a run.
    ///
    /// Input is validated even when a run is already in progress; a valid
    /// start while running or paused changes nothing.
    pub fn start(&mut self, inputs: &PacerInputs) -> Result<(), PacerError> {
        let config = match inputs.to_config() {
            Ok(config) => config,
            Err(err) => {
                warn!("Rejected start: {}", err);
                self.sink.on_validation_error(err);
                return Err(err);
            }
        };

        if self.running {
            debug!("Start ignored, already running");
            return Ok(());
        }
        if self.phase == Phase::Paused {
            debug!("Start ignored while paused, reset first");
            return Ok(());
        }

        self.begin(config);
        Ok(())
    }

    fn begin(&mut self, config: PacerConfig) {
        self.config = Some(config);
        self.running = true;
        self.phase = Phase::BreathingIn;
        self.start_timestamp = self.scheduler.now_ms();
        self.cycle_count = 0;

        info!(
            "Breathing started: {}s cycle, radius {} -> {}",
            config.cycle_duration_secs(),
            config.start_radius(),
            config.end_radius()
        );

        let snapshot = config.initial_snapshot();
        self.last_snapshot = Some(snapshot);
        let buttons = self.button_state();
        self.sink.on_button_state_change(buttons);
        self.sink.on_snapshot(&snapshot);
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Freeze the circle where it is. Does nothing unless running.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.cancel_pending();
        self.running = false;
        self.phase = Phase::Paused;
        info!("Breathing stopped after {} cycle(s)", self.cycle_count);

        let buttons = self.button_state();
        self.sink.on_button_state_change(buttons);
        if let Some(last) = self.last_snapshot.as_mut() {
            last.phase = Phase::Paused;
            let paused = *last;
            self.sink.on_snapshot(&paused);
        }
    }

    /// Return to idle and redraw at the start radius currently in `inputs`.
    pub fn reset(&mut self, inputs: &PacerInputs) {
        self.cancel_pending();
        self.running = false;
        self.phase = Phase::Idle;
        self.cycle_count = 0;
        info!("Breathing reset");

        let (start_radius, _) = inputs.preview_radii();
        let snapshot = Snapshot {
            radius: f64::from(start_radius),
            phase: Phase::Idle,
            countdown_seconds: inputs.preview_duration_secs(),
            cycle_count: 0,
        };
        self.last_snapshot = Some(snapshot);
        let buttons = self.button_state();
        self.sink.on_button_state_change(buttons);
        self.sink.on_snapshot(&snapshot);
    }

    /// Handle one frame. Frames delivered after a stop or reset are ignored.
    pub fn on_tick(&mut self, timestamp_ms: f64) {
        if !self.running {
            trace!("Ignoring stale frame at {}", timestamp_ms);
            return;
        }
        let Some(config) = self.config else {
            return;
        };
        // The request that delivered this frame is spent.
        self.pending = None;

        let mut snapshot = config.snapshot_at(timestamp_ms - self.start_timestamp);
        if snapshot.cycle_count > self.cycle_count {
            self.cycle_count = snapshot.cycle_count;
            debug!("Cycle {} begins", self.cycle_count);
        }
        snapshot.cycle_count = self.cycle_count;
        self.phase = snapshot.phase;
        self.last_snapshot = Some(snapshot);

        self.sink.on_snapshot(&snapshot);
        self.pending = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn button_state(&self) -> ButtonState {
        ButtonState::for_phase(self.phase)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn config(&self) -> Option<&PacerConfig> {
        self.config.as_ref()
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }
}

impl<S: FrameScheduler, P: PresentationSink> Drop for BreathingEngine<S, P> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
