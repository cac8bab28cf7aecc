//! Scripted end-to-end session: load an image, caption it, read it aloud,
//! then clear. Frames land in a recording target and are printed as JSON so
//! the display list the collaborator would rasterize is visible.
//!
//! Run with `cargo run --example scripted_meme`.

use meme_studio::{
    Command, Dimensions, LogLevel, Logger, MemorySink, NullSpeech, RecordingTarget, StudioConfig,
    StudioRuntime, Voice,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sink = MemorySink::new();
    let mut config = StudioConfig::default();
    config.logger = Some(Logger::new(sink.clone()));
    config.enable_metrics();

    let mut studio = StudioRuntime::with_config(
        Dimensions::new(400.0, 300.0),
        Box::new(NullSpeech),
        config,
    )?;

    let script = vec![
        Command::VoicesReady {
            voices: vec![
                Voice::new("Alex", "en-US", true),
                Voice::new("Daniel", "en-GB", false),
            ],
        },
        Command::SetVolume { value: 60 },
        Command::LoadImage {
            name: "distracted-boyfriend.jpg".into(),
        },
        Command::ImageDecoded {
            dimensions: Dimensions::new(1200.0, 800.0),
        },
        Command::GenerateCaption {
            top: "ME, WRITING RUST".into(),
            bottom: "THE BORROW CHECKER".into(),
        },
        Command::Speak,
        Command::PlaybackFinished,
        Command::Clear,
    ];

    let mut target = RecordingTarget::new();
    studio.run_scripted(script, &mut target)?;

    for (idx, frame) in target.frames().iter().enumerate() {
        println!("frame {idx}: {}", serde_json::to_string_pretty(frame)?);
    }

    for event in sink.events() {
        if matches!(event.level, LogLevel::Info) {
            println!("log: {}", serde_json::to_string(&event)?);
        }
    }

    Ok(())
}
