//! Caption module orchestrator.

mod core;

pub use core::{CaptionPair, CaptionStyle, TOP_BASELINE, BOTTOM_BASELINE, display_width};
