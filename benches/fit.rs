use criterion::{Criterion, black_box, criterion_group, criterion_main};
use meme_studio::{
    Command, Dimensions, NullSpeech, RecordingTarget, StudioRuntime, Voice, compute_fit,
};

fn fit_calculator(c: &mut Criterion) {
    let container = Dimensions::new(400.0, 300.0);
    let contents = [
        Dimensions::new(100.0, 200.0),
        Dimensions::new(200.0, 100.0),
        Dimensions::new(640.0, 480.0),
        Dimensions::new(1080.0, 1920.0),
    ];

    c.bench_function("fit_calculator", |b| {
        b.iter(|| {
            for content in contents {
                let placement =
                    compute_fit(black_box(container), black_box(content)).expect("fit");
                black_box(placement);
            }
        });
    });
}

fn scripted_session(c: &mut Criterion) {
    let script = session_script();
    c.bench_function("scripted_session", |b| {
        b.iter(|| {
            let mut studio = build_studio().expect("studio");
            let mut target = RecordingTarget::new();
            studio
                .run_scripted(black_box(script.clone()), &mut target)
                .expect("scripted run");
        });
    });
}

fn build_studio() -> meme_studio::Result<StudioRuntime> {
    StudioRuntime::new(Dimensions::new(400.0, 300.0), Box::new(NullSpeech))
}

fn session_script() -> Vec<Command> {
    vec![
        Command::VoicesReady {
            voices: vec![Voice::new("Alex", "en-US", true)],
        },
        Command::LoadImage {
            name: "bench.png".into(),
        },
        Command::ImageDecoded {
            dimensions: Dimensions::new(1280.0, 720.0),
        },
        Command::GenerateCaption {
            top: "ONE DOES NOT SIMPLY".into(),
            bottom: "BENCHMARK A MEME".into(),
        },
        Command::Speak,
        Command::PlaybackFinished,
        Command::Clear,
    ]
}

criterion_group!(benches, fit_calculator, scripted_session);
criterion_main!(benches);
