pub mod animation;
pub mod clock;
pub mod color;
pub mod commands;
pub mod config;
pub mod constants;
pub mod devices;
pub mod error;
pub mod orchestrator;
pub mod speech;
pub mod state;
pub mod utils;

pub use animation::{Animation, BoxedAnimation, Stage};
pub use clock::{Clock, ManualClock, SystemClock};
pub use color::*;
pub use commands::{Dispatcher, Tokens};
pub use config::Config;
pub use constants::*;
pub use devices::{AudioSource, Heard, LightSink, SpeechSource};
pub use error::{Error, Result};
pub use orchestrator::{Command, Jacket, Keyword};
pub use speech::ListenWindow;
pub use state::{MoodSnapshot, MoodState, Setting};
