//! Surface module orchestrator.

mod core;

pub use core::{Color, DrawOp, RecordingTarget, RenderTarget, Surface};
