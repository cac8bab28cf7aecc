use serde::Serialize;

/// Extent of a drawing surface or of decoded image content, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height. Meaningless unless `is_valid()` holds.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Both axes finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Rectangle at which scaled content lands inside a container, anchored at
/// its top-left corner in container coordinates.
///
/// A placement is computed fresh on every fit call and consumed immediately
/// by a draw op; nothing in the crate caches or mutates one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
