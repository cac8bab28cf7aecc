use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated across a studio session.
#[derive(Debug, Default, Clone)]
pub struct StudioMetrics {
    commands: u64,
    ignored: u64,
    fits: u64,
    frames: u64,
    utterances: u64,
}

impl StudioMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_command(&mut self) {
        self.commands = self.commands.saturating_add(1);
    }

    pub fn record_ignored(&mut self) {
        self.ignored = self.ignored.saturating_add(1);
    }

    pub fn record_fit(&mut self) {
        self.fits = self.fits.saturating_add(1);
    }

    pub fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    pub fn record_utterance(&mut self) {
        self.utterances = self.utterances.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            commands: self.commands,
            ignored: self.ignored,
            fits: self.fits,
            frames: self.frames,
            utterances: self.utterances,
        }
    }
}

/// Point-in-time copy of the counters, ready to log.
#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub commands: u64,
    pub ignored: u64,
    pub fits: u64,
    pub frames: u64,
    pub utterances: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        let mut fields = LogFields::new();
        fields.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        fields.insert("commands".to_string(), json!(self.commands));
        fields.insert("ignored".to_string(), json!(self.ignored));
        fields.insert("fits".to_string(), json!(self.fits));
        fields.insert("frames".to_string(), json!(self.frames));
        fields.insert("utterances".to_string(), json!(self.utterances));
        LogEvent::with_fields(LogLevel::Info, target, "studio_metrics", fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_all_counters() {
        let mut metrics = StudioMetrics::new();
        metrics.record_command();
        metrics.record_command();
        metrics.record_ignored();
        metrics.record_fit();
        metrics.record_frame();
        metrics.record_utterance();

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.uptime_ms, 1500);
        assert_eq!(snapshot.commands, 2);
        assert_eq!(snapshot.ignored, 1);
        assert_eq!(snapshot.fits, 1);
        assert_eq!(snapshot.frames, 1);
        assert_eq!(snapshot.utterances, 1);

        let event = snapshot.to_log_event("studio::metrics");
        assert_eq!(event.message, "studio_metrics");
        assert_eq!(event.fields.get("commands"), Some(&serde_json::json!(2)));
    }
}
