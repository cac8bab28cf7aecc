use blake3::Hash;
use serde::Serialize;

use crate::caption::CaptionStyle;
use crate::error::{Result, StudioError};
use crate::geometry::{Dimensions, Placement};

/// The only two colours a meme frame ever needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

/// One entry in the surface's display list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Flood the whole surface with a colour.
    Fill { color: Color },
    /// Blit decoded image content at its fitted placement.
    Image { name: String, placement: Placement },
    /// A caption line centred at `x`, baseline at `y`.
    Text {
        line: String,
        x: f64,
        y: f64,
        style: CaptionStyle,
    },
}

/// Sink the studio presents finished frames to. Real rasterization lives on
/// the collaborator's side of this trait; the crate never touches pixels.
pub trait RenderTarget {
    fn present(&mut self, size: Dimensions, ops: &[DrawOp]) -> Result<()>;
}

/// Fixed-size drawing surface backed by a display list.
///
/// Presenting is skipped when the display list hashes identically to the
/// last presented frame; a frame only goes downstream when its hash moves.
pub struct Surface {
    size: Dimensions,
    ops: Vec<DrawOp>,
    presented: Option<Hash>,
}

impl Surface {
    pub fn new(size: Dimensions) -> Result<Self> {
        if !size.is_valid() {
            return Err(StudioError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self {
            size,
            ops: Vec::new(),
            presented: None,
        })
    }

    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn fill(&mut self, color: Color) {
        self.ops.push(DrawOp::Fill { color });
    }

    pub fn blit(&mut self, name: impl Into<String>, placement: Placement) {
        self.ops.push(DrawOp::Image {
            name: name.into(),
            placement,
        });
    }

    pub fn text(&mut self, line: impl Into<String>, x: f64, y: f64, style: CaptionStyle) {
        self.ops.push(DrawOp::Text {
            line: line.into(),
            x,
            y,
            style,
        });
    }

    /// Drop every queued op. The last-presented hash survives, so a clear
    /// followed by a present pushes the now-empty frame downstream.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Present the display list to `target` unless it is identical to the
    /// frame presented last time. Returns whether a present happened.
    pub fn present(&mut self, target: &mut dyn RenderTarget) -> Result<bool> {
        let digest = self.digest();
        if self.presented.map(|h| h == digest).unwrap_or(false) {
            return Ok(false);
        }
        target.present(self.size, &self.ops)?;
        self.presented = Some(digest);
        Ok(true)
    }

    fn digest(&self) -> Hash {
        let bytes = serde_json::to_vec(&self.ops).unwrap_or_default();
        blake3::hash(&bytes)
    }
}

/// Render target that stores every presented frame. Used by tests and demos
/// in place of a real rasterizer.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    frames: Vec<Vec<DrawOp>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<DrawOp>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[DrawOp]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl RenderTarget for RecordingTarget {
    fn present(&mut self, _size: Dimensions, ops: &[DrawOp]) -> Result<()> {
        self.frames.push(ops.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface {
        Surface::new(Dimensions::new(400.0, 300.0)).unwrap()
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(Surface::new(Dimensions::new(0.0, 300.0)).is_err());
        assert!(Surface::new(Dimensions::new(400.0, -1.0)).is_err());
    }

    #[test]
    fn present_skips_unchanged_frames() {
        let mut surface = surface();
        let mut target = RecordingTarget::new();

        surface.fill(Color::Black);
        assert!(surface.present(&mut target).unwrap());
        assert!(!surface.present(&mut target).unwrap());
        assert_eq!(target.frames().len(), 1);

        surface.text("HELLO", 200.0, 30.0, CaptionStyle::Fill);
        assert!(surface.present(&mut target).unwrap());
        assert_eq!(target.frames().len(), 2);
    }

    #[test]
    fn clear_produces_a_fresh_empty_frame() {
        let mut surface = surface();
        let mut target = RecordingTarget::new();

        surface.fill(Color::Black);
        surface.present(&mut target).unwrap();

        surface.clear();
        assert!(surface.present(&mut target).unwrap());
        assert_eq!(target.last_frame().unwrap().len(), 0);
    }
}
