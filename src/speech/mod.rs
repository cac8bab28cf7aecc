use serde::Serialize;

use crate::error::{Result, StudioError};

/// One synthesized voice as reported by the speech subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
    pub default_voice: bool,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>, default_voice: bool) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            default_voice,
        }
    }

    /// Menu label: `Name (lang)`, with a marker appended for the default
    /// voice.
    pub fn label(&self) -> String {
        if self.default_voice {
            format!("{} ({}) -- DEFAULT", self.name, self.lang)
        } else {
            format!("{} ({})", self.name, self.lang)
        }
    }
}

/// Voice list with an explicit ready transition.
///
/// The catalog starts empty and not ready; `install` is the readiness
/// notification from the speech subsystem. There is no polling and no timer:
/// until `install` runs, every attempt to resolve a voice fails with
/// `VoicesNotReady`.
#[derive(Debug, Default)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
    ready: bool,
    selected: Option<usize>,
}

impl VoiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Install the voice list and mark the catalog ready. The default voice
    /// becomes the selection when one is flagged, otherwise the first entry.
    pub fn install(&mut self, voices: Vec<Voice>) {
        self.selected = voices
            .iter()
            .position(|v| v.default_voice)
            .or((!voices.is_empty()).then_some(0));
        self.voices = voices;
        self.ready = true;
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Menu labels in catalog order.
    pub fn labels(&self) -> Vec<String> {
        self.voices.iter().map(Voice::label).collect()
    }

    pub fn select(&mut self, name: &str) -> Result<()> {
        if !self.ready {
            return Err(StudioError::VoicesNotReady);
        }
        match self.voices.iter().position(|v| v.name == name) {
            Some(idx) => {
                self.selected = Some(idx);
                Ok(())
            }
            None => Err(StudioError::VoiceNotFound(name.to_string())),
        }
    }

    pub fn selected(&self) -> Result<&Voice> {
        if !self.ready {
            return Err(StudioError::VoicesNotReady);
        }
        self.selected
            .and_then(|idx| self.voices.get(idx))
            .ok_or_else(|| StudioError::VoiceNotFound(String::from("<none>")))
    }
}

/// Playback volume on the 0..=100 slider scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Volume(u8);

impl Default for Volume {
    fn default() -> Self {
        Self(100)
    }
}

impl Volume {
    /// Values above 100 are clamped to the top of the slider.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Backend gain in `0.0..=1.0`.
    pub fn gain(&self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn level(&self) -> VolumeLevel {
        match self.0 {
            0 => VolumeLevel::Muted,
            1..=33 => VolumeLevel::Low,
            34..=66 => VolumeLevel::Medium,
            _ => VolumeLevel::High,
        }
    }
}

/// Icon bucket for the volume slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeLevel {
    Muted,
    Low,
    Medium,
    High,
}

impl VolumeLevel {
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Muted => "icons/volume-level-0.svg",
            Self::Low => "icons/volume-level-1.svg",
            Self::Medium => "icons/volume-level-2.svg",
            Self::High => "icons/volume-level-3.svg",
        }
    }
}

/// A single request handed to the speech backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub voice_name: String,
    pub gain: f32,
}

/// Synthesis seam. The real subsystem lives outside the crate; tests and
/// demos use [`NullSpeech`].
pub trait SpeechBackend: Send {
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;
}

/// Backend that accepts every utterance and does nothing.
#[derive(Debug, Default)]
pub struct NullSpeech;

impl SpeechBackend for NullSpeech {
    fn speak(&mut self, _utterance: &Utterance) -> Result<()> {
        Ok(())
    }
}
