//! Meme studio composition engine.
//!
//! Models a meme maker as a library: a fixed-size surface, a fit calculator
//! that letterboxes arbitrary-ratio images onto it, top/bottom captions, and
//! a speech layer that reads the captions aloud. All behaviour is driven
//! through explicit [`Command`] values against a [`StudioRuntime`]; image
//! decoding, rasterization, and audio output stay behind the
//! [`RenderTarget`] and [`SpeechBackend`] seams.

pub mod caption;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod logging;
pub mod metrics;
pub mod speech;
pub mod studio;
pub mod surface;

pub use caption::{BOTTOM_BASELINE, CaptionPair, CaptionStyle, TOP_BASELINE, display_width};
pub use error::{Result, StudioError};
pub use fit::compute_fit;
pub use geometry::{Dimensions, Placement};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, event_with_fields, json_kv,
};
pub use metrics::{MetricSnapshot, StudioMetrics};
pub use speech::{NullSpeech, SpeechBackend, Utterance, Voice, VoiceCatalog, Volume, VolumeLevel};
pub use studio::{
    Command, CommandFlow, Controls, ImageLoadState, PlaybackState, StudioConfig, StudioRuntime,
};
pub use surface::{Color, DrawOp, RecordingTarget, RenderTarget, Surface};
