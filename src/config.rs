//! Application-level configuration constants.

use log::LevelFilter;

// Default values for input fields
pub const DEFAULT_DURATION_SECS: f64 = 5.0;
pub const DEFAULT_START_RADIUS: u32 = 40;
pub const DEFAULT_END_RADIUS: u32 = 120;

// Min/Max limits for input fields
pub const MIN_DURATION_SECS: f64 = 0.5;
pub const MAX_DURATION_SECS: f64 = 3600.0;
pub const DURATION_STEP_SECS: f64 = 0.5;
pub const MIN_RADIUS: u32 = 1;

// Each configured second is split across the two legs of a cycle
pub const HALF_CYCLE_MS_PER_SEC: f64 = 500.0;

// Circle colors
pub const INHALE_COLOR: &str = "#4CAF50";
pub const INHALE_GLOW: &str = "0 0 20px rgba(76, 175, 80, 0.5)";
pub const EXHALE_COLOR: &str = "#f44336";
pub const EXHALE_GLOW: &str = "0 0 20px rgba(244, 67, 54, 0.5)";

// Logging
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;
