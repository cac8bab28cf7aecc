use thiserror::Error;

/// Unified result type for the studio crate.
pub type Result<T> = std::result::Result<T, StudioError>;

/// Errors surfaced by the composition engine.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("invalid dimensions {width}x{height}: both axes must be finite and positive")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("voice catalog not ready; playback requires an installed voice list")]
    VoicesNotReady,
    #[error("voice `{0}` not found in catalog")]
    VoiceNotFound(String),
    #[error("render target failure: {0}")]
    Target(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
