use serde::Serialize;

/// Distance from the top edge of the surface to the top caption's baseline.
pub const TOP_BASELINE: f64 = 30.0;

/// Distance from the bottom edge of the surface to the bottom caption's
/// baseline.
pub const BOTTOM_BASELINE: f64 = 11.0;

/// The pair of texts overlaid on a meme, top and bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaptionPair {
    pub top: String,
    pub bottom: String,
}

impl CaptionPair {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// True when both texts are empty. Generating or speaking an empty pair
    /// is a no-op.
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty()
    }

    /// Text handed to the speech backend: top line, newline, bottom line.
    pub fn speech_text(&self) -> String {
        format!("{}\n{}", self.top, self.bottom)
    }

    pub fn clear(&mut self) {
        self.top.clear();
        self.bottom.clear();
    }
}

/// How a caption line is painted: the fill laid down first, then the
/// outline stroked over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionStyle {
    Fill,
    Outline,
}

/// Display width of a caption line in terminal-style cells. Collaborators
/// that centre text by cell count rather than font metrics use this.
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_only_when_both_texts_are_empty() {
        assert!(CaptionPair::default().is_empty());
        assert!(!CaptionPair::new("TOP", "").is_empty());
        assert!(!CaptionPair::new("", "BOTTOM").is_empty());
    }

    #[test]
    fn speech_text_joins_with_newline() {
        let pair = CaptionPair::new("ONE DOES NOT SIMPLY", "WRITE A MEME");
        assert_eq!(pair.speech_text(), "ONE DOES NOT SIMPLY\nWRITE A MEME");
    }

    #[test]
    fn clear_resets_both_texts() {
        let mut pair = CaptionPair::new("a", "b");
        pair.clear();
        assert!(pair.is_empty());
    }

    #[test]
    fn display_width_counts_wide_glyphs() {
        assert_eq!(display_width("meme"), 4);
        assert_eq!(display_width("ミーム"), 6);
    }
}
