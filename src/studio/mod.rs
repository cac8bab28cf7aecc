use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;

use crate::caption::{BOTTOM_BASELINE, CaptionPair, CaptionStyle, TOP_BASELINE};
use crate::error::Result;
use crate::fit::compute_fit;
use crate::geometry::Dimensions;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::StudioMetrics;
use crate::speech::{SpeechBackend, Utterance, Voice, VoiceCatalog, Volume};
use crate::surface::{Color, RenderTarget, Surface};

/// Configuration knobs for a studio session.
#[derive(Clone)]
pub struct StudioConfig {
    /// Optional structured logger used by the runtime.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<StudioMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "studio::metrics".to_string(),
        }
    }
}

impl StudioConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(StudioMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<StudioMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Discrete commands the studio reacts to. Image selection, decode
/// completion, and button presses all arrive here as explicit values.
#[derive(Debug, Clone)]
pub enum Command {
    /// A new image file was picked; decoding is now in flight.
    LoadImage { name: String },
    /// The decoder finished and reported the image extent.
    ImageDecoded { dimensions: Dimensions },
    /// Overlay the caption pair onto the surface.
    GenerateCaption { top: String, bottom: String },
    /// Wipe the surface, the captions, and the loaded image.
    Clear,
    /// Read the current captions aloud.
    Speak,
    /// Pick a voice from the catalog by name.
    SelectVoice { name: String },
    /// Move the volume slider.
    SetVolume { value: u8 },
    /// The speech subsystem finished enumerating voices.
    VoicesReady { voices: Vec<Voice> },
    /// The backend finished the current utterance.
    PlaybackFinished,
}

/// Whether a dispatched command changed anything.
///
/// Guard failures (empty captions, a disabled button, a stale decode) are
/// `Ignored`, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFlow {
    Applied,
    Ignored,
}

/// Where the user image is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageLoadState {
    Empty,
    Loading { name: String },
    Ready { name: String, dimensions: Dimensions },
}

/// Whether an utterance is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Speaking,
}

/// Enabled flags for the three buttons. Generating flips all three at once
/// and clearing flips them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub generate: bool,
    pub clear: bool,
    pub speak: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            generate: true,
            clear: false,
            speak: false,
        }
    }
}

impl Controls {
    fn toggle(&mut self) {
        self.generate = !self.generate;
        self.clear = !self.clear;
        self.speak = !self.speak;
    }
}

/// The meme studio: a fixed-size surface, the caption pair, the voice
/// catalog, and the two state machines, all driven through [`dispatch`].
///
/// [`dispatch`]: StudioRuntime::dispatch
pub struct StudioRuntime {
    surface: Surface,
    captions: CaptionPair,
    catalog: VoiceCatalog,
    volume: Volume,
    image: ImageLoadState,
    playback: PlaybackState,
    controls: Controls,
    backend: Box<dyn SpeechBackend>,
    config: StudioConfig,
    start_instant: Option<Instant>,
    last_metrics_emit: Option<Instant>,
}

impl StudioRuntime {
    pub fn new(surface_size: Dimensions, backend: Box<dyn SpeechBackend>) -> Result<Self> {
        Self::with_config(surface_size, backend, StudioConfig::default())
    }

    pub fn with_config(
        surface_size: Dimensions,
        backend: Box<dyn SpeechBackend>,
        config: StudioConfig,
    ) -> Result<Self> {
        Ok(Self {
            surface: Surface::new(surface_size)?,
            captions: CaptionPair::default(),
            catalog: VoiceCatalog::new(),
            volume: Volume::default(),
            image: ImageLoadState::Empty,
            playback: PlaybackState::Idle,
            controls: Controls::default(),
            backend,
            config,
            start_instant: None,
            last_metrics_emit: None,
        })
    }

    pub fn config_mut(&mut self) -> &mut StudioConfig {
        &mut self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn captions(&self) -> &CaptionPair {
        &self.captions
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn image_state(&self) -> &ImageLoadState {
        &self.image
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Apply one command to the studio state.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandFlow> {
        let name = Self::describe_command(&command);
        let flow = self.apply(command)?;

        self.record_command_metric(flow);
        self.log_studio_event(
            LogLevel::Debug,
            "command_dispatched",
            [
                json_kv("command", json!(name)),
                json_kv("applied", json!(flow == CommandFlow::Applied)),
            ],
        );
        self.maybe_emit_metrics();
        Ok(flow)
    }

    /// Drive a whole command sequence, presenting the surface to `target`
    /// after every command that leaves it changed.
    pub fn run_scripted<I>(&mut self, commands: I, target: &mut dyn RenderTarget) -> Result<()>
    where
        I: IntoIterator<Item = Command>,
    {
        self.bootstrap();
        for command in commands {
            self.dispatch(command)?;
            self.present(target)?;
        }
        self.finalize();
        Ok(())
    }

    /// Present the surface if its display list changed since the last
    /// present. Returns whether a frame went out.
    pub fn present(&mut self, target: &mut dyn RenderTarget) -> Result<bool> {
        let presented = self.surface.present(target)?;
        if presented {
            self.record_frame_metric();
            self.log_studio_event(
                LogLevel::Debug,
                "frame_presented",
                [json_kv("ops", json!(self.surface.ops().len()))],
            );
        }
        Ok(presented)
    }

    fn apply(&mut self, command: Command) -> Result<CommandFlow> {
        match command {
            Command::LoadImage { name } => self.on_load_image(name),
            Command::ImageDecoded { dimensions } => self.on_image_decoded(dimensions),
            Command::GenerateCaption { top, bottom } => self.on_generate(top, bottom),
            Command::Clear => self.on_clear(),
            Command::Speak => self.on_speak(),
            Command::SelectVoice { name } => {
                self.catalog.select(&name)?;
                Ok(CommandFlow::Applied)
            }
            Command::SetVolume { value } => {
                self.volume = Volume::new(value);
                self.log_studio_event(
                    LogLevel::Debug,
                    "volume_changed",
                    [
                        json_kv("value", json!(self.volume.value())),
                        json_kv("icon", json!(self.volume.level().icon_name())),
                    ],
                );
                Ok(CommandFlow::Applied)
            }
            Command::VoicesReady { voices } => {
                let count = voices.len();
                self.catalog.install(voices);
                self.log_studio_event(
                    LogLevel::Info,
                    "voices_installed",
                    [json_kv("count", json!(count))],
                );
                Ok(CommandFlow::Applied)
            }
            Command::PlaybackFinished => {
                if self.playback == PlaybackState::Speaking {
                    self.playback = PlaybackState::Idle;
                    Ok(CommandFlow::Applied)
                } else {
                    Ok(CommandFlow::Ignored)
                }
            }
        }
    }

    fn on_load_image(&mut self, name: String) -> Result<CommandFlow> {
        // Picking a new file clears the caption form.
        self.captions.clear();
        self.log_studio_event(
            LogLevel::Info,
            "image_load_started",
            [json_kv("name", json!(name.clone()))],
        );
        self.image = ImageLoadState::Loading { name };
        Ok(CommandFlow::Applied)
    }

    fn on_image_decoded(&mut self, dimensions: Dimensions) -> Result<CommandFlow> {
        let ImageLoadState::Loading { name } = &self.image else {
            // Stale decode, e.g. delivered after a Clear.
            return Ok(CommandFlow::Ignored);
        };
        let name = name.clone();

        let placement = compute_fit(self.surface.size(), dimensions)?;
        self.record_fit_metric();

        self.surface.clear();
        self.surface.fill(Color::Black);
        self.surface.blit(name.clone(), placement);

        self.log_studio_event(
            LogLevel::Info,
            "image_ready",
            [
                json_kv("name", json!(name.clone())),
                json_kv("width", json!(placement.width)),
                json_kv("height", json!(placement.height)),
                json_kv("x", json!(placement.x)),
                json_kv("y", json!(placement.y)),
            ],
        );
        self.image = ImageLoadState::Ready { name, dimensions };
        Ok(CommandFlow::Applied)
    }

    fn on_generate(&mut self, top: String, bottom: String) -> Result<CommandFlow> {
        if !self.controls.generate {
            return Ok(CommandFlow::Ignored);
        }
        let pair = CaptionPair::new(top, bottom);
        if pair.is_empty() {
            return Ok(CommandFlow::Ignored);
        }

        let size = self.surface.size();
        let centre = size.width / 2.0;
        let top_y = TOP_BASELINE;
        let bottom_y = size.height - BOTTOM_BASELINE;

        // Fill both lines first, then stroke the outlines over them.
        self.surface
            .text(pair.top.clone(), centre, top_y, CaptionStyle::Fill);
        self.surface
            .text(pair.bottom.clone(), centre, bottom_y, CaptionStyle::Fill);
        self.surface
            .text(pair.top.clone(), centre, top_y, CaptionStyle::Outline);
        self.surface
            .text(pair.bottom.clone(), centre, bottom_y, CaptionStyle::Outline);

        self.captions = pair;
        self.controls.toggle();
        self.log_studio_event(LogLevel::Info, "caption_generated", std::iter::empty());
        Ok(CommandFlow::Applied)
    }

    fn on_clear(&mut self) -> Result<CommandFlow> {
        if !self.controls.clear {
            return Ok(CommandFlow::Ignored);
        }
        self.surface.clear();
        self.captions.clear();
        self.image = ImageLoadState::Empty;
        self.controls.toggle();
        self.log_studio_event(LogLevel::Info, "surface_cleared", std::iter::empty());
        Ok(CommandFlow::Applied)
    }

    fn on_speak(&mut self) -> Result<CommandFlow> {
        if !self.controls.speak {
            return Ok(CommandFlow::Ignored);
        }
        if self.captions.is_empty() {
            return Ok(CommandFlow::Ignored);
        }
        if self.playback == PlaybackState::Speaking {
            // No queueing; the current utterance has to finish first.
            return Ok(CommandFlow::Ignored);
        }

        let voice = self.catalog.selected()?;
        let utterance = Utterance {
            text: self.captions.speech_text(),
            voice_name: voice.name.clone(),
            gain: self.volume.gain(),
        };
        self.backend.speak(&utterance)?;
        self.record_utterance_metric();
        self.playback = PlaybackState::Speaking;
        self.log_studio_event(
            LogLevel::Info,
            "utterance_started",
            [
                json_kv("voice", json!(utterance.voice_name)),
                json_kv("gain", json!(utterance.gain)),
            ],
        );
        Ok(CommandFlow::Applied)
    }

    fn bootstrap(&mut self) {
        let now = Instant::now();
        self.start_instant = Some(now);
        self.last_metrics_emit = Some(now);
        let size = self.surface.size();
        self.log_studio_event(
            LogLevel::Info,
            "studio_started",
            [
                json_kv("surface_width", json!(size.width)),
                json_kv("surface_height", json!(size.height)),
            ],
        );
    }

    fn finalize(&mut self) {
        let uptime_ms = self
            .start_instant
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0);
        self.log_studio_event(
            LogLevel::Info,
            "studio_stopped",
            [json_kv("uptime_ms", json!(uptime_ms as u64))],
        );
    }

    fn log_studio_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, "studio::runtime", message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record_command_metric(&mut self, flow: CommandFlow) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_command();
                if flow == CommandFlow::Ignored {
                    guard.record_ignored();
                }
            }
        }
    }

    fn record_fit_metric(&mut self) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_fit();
            }
        }
    }

    fn record_frame_metric(&mut self) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_frame();
            }
        }
    }

    fn record_utterance_metric(&mut self) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_utterance();
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics.is_none() {
            return;
        }
        if self.config.metrics_interval == Duration::from_millis(0) {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => {
                return;
            }
            _ => {
                self.last_metrics_emit = Some(now);
            }
        }

        let uptime = self
            .start_instant
            .map(|start| now.duration_since(start))
            .unwrap_or_default();

        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let target = self.config.metrics_target.as_str();
                let _ = logger.log_event(guard.snapshot(uptime).to_log_event(target));
            }
        }
    }

    fn describe_command(command: &Command) -> &'static str {
        match command {
            Command::LoadImage { .. } => "load_image",
            Command::ImageDecoded { .. } => "image_decoded",
            Command::GenerateCaption { .. } => "generate_caption",
            Command::Clear => "clear",
            Command::Speak => "speak",
            Command::SelectVoice { .. } => "select_voice",
            Command::SetVolume { .. } => "set_volume",
            Command::VoicesReady { .. } => "voices_ready",
            Command::PlaybackFinished => "playback_finished",
        }
    }
}
