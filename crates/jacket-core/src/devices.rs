//! Collaborator seams: the LED strip, the microphone and the speech recognizer.

use crate::color::Color;
use crate::error::Result;

/// Addressable LED strip with a pixel buffer that is pushed out by `show`.
pub trait LightSink: Send {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_pixel(&mut self, index: usize, color: Color);

    fn fill(&mut self, color: Color) {
        for i in 0..self.len() {
            self.set_pixel(i, color);
        }
    }

    /// Flush the buffer to the hardware.
    fn show(&mut self) -> Result<()>;
}

/// Mono signed 16-bit microphone capture.
pub trait AudioSource: Send + Sync {
    /// Take the newest captured buffer, if one arrived since the last call.
    /// It becomes what `last_read` returns. Fails once the capture stream has.
    fn read(&self) -> Result<Option<Vec<i16>>>;

    /// The most recent buffer taken by `read`, without consuming anything.
    fn last_read(&self) -> Option<Vec<i16>>;
}

/// Result of a bounded command listen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Heard {
    pub text: Option<String>,
    pub score: Option<i32>,
}

pub trait SpeechSource: Send {
    /// Block until one of the configured keywords is spotted.
    fn listen_keyword(&mut self) -> Result<String>;

    /// Record one command, bounded by the configured min/max listen time.
    fn listen_command(&mut self) -> Result<Heard>;
}
