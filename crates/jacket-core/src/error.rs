use thiserror::Error;

/// Failures raised by collaborators or bootstrap. Animation end-of-stream and
/// unmatched commands are not errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("light strip: {0}")]
    Light(String),
    #[error("audio input: {0}")]
    Audio(String),
    #[error("speech recognizer: {0}")]
    Speech(String),
    #[error("configuration: {0}")]
    Config(String),
    #[error("worker thread {name}: {reason}")]
    Thread { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
