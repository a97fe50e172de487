// Fixed tuning constants shared by the animations and the orchestrator.
// Startup-configurable values live in `config.rs`.

// Mood ranges
pub const HAPPINESS_MIN: i32 = -3;
pub const HAPPINESS_MAX: i32 = 3;
pub const BRIGHTNESS_MIN: i32 = 0;
pub const BRIGHTNESS_MAX: i32 = 3;
pub const DEFAULT_HAPPINESS: i32 = 0;
pub const DEFAULT_BRIGHTNESS: i32 = 2; // medium
pub const HUE_DEGREES: f64 = 360.0;

// Happiness -> animation frequency mapping (Hz)
pub const SAD_FREQUENCY_HZ: f64 = 0.25;
pub const HAPPY_FREQUENCY_HZ: f64 = 2.0;

// Color
pub const GAMMA: f64 = 2.8;

// Loop cadence
pub const TICK_RATE_HZ: f64 = 60.0;

// Idle flow dims to this fraction of full intensity at the bottom of its wave
pub const IDLE_MIN_FRACTION: f64 = 0.5;
// Pulses only dip to this fraction
pub const PULSE_MIN_FRACTION: f64 = 0.75;

// Listening pulse shown while a command is being recorded
pub const LISTEN_PULSE_HUE: f64 = 80.0; // green/yellow
pub const LISTEN_PULSE_HZ: f64 = 2.0;
pub const LISTEN_FADE_S: f64 = 1.0;

// Mood-change flash layered over the current animation
pub const HAPPY_PULSE_HUE: f64 = 350.0; // warm
pub const SAD_PULSE_HUE: f64 = 240.0; // cool
pub const MOOD_PULSE_HZ: f64 = 1.0;
pub const MOOD_HOLD_S: f64 = 0.5;
pub const MOOD_FADE_S: f64 = 1.5;

// Command animations
pub const WINK_DURATION_S: f64 = 0.75;
pub const TRANSIENT_FADE_S: f64 = 1.0;

// Spectrum: decibel level that maps to full intensity
pub const SPECTRUM_MAX_DB: f64 = 30.0;
