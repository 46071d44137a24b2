//! Error types
//!
//! Only initialization can fail. Everything after the first frame degrades
//! visually instead of returning errors.

use thiserror::Error;

/// Initialization failures surfaced once to the host
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("failed to find a suitable GPU adapter")]
    NoAdapter,
    #[error("failed to create GPU device: {0}")]
    Device(String),
    #[error("failed to create surface: {0}")]
    Surface(String),
    #[error("the backdrop renderer only supports wasm32 targets")]
    UnsupportedTarget,
    #[error("missing DOM host: {0}")]
    MissingHost(&'static str),
}

/// Reasons a single frame was not presented
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FrameSkipped {
    #[error("surface reconfigured, frame skipped")]
    Reconfigured,
    #[error("GPU timeout, frame skipped")]
    Timeout,
    #[error("out of GPU memory")]
    OutOfMemory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BackdropError::MissingHost("document").to_string(),
            "missing DOM host: document"
        );
        assert_eq!(
            BackdropError::Device("lost".into()).to_string(),
            "failed to create GPU device: lost"
        );
        assert_eq!(FrameSkipped::Timeout.to_string(), "GPU timeout, frame skipped");
    }
}
