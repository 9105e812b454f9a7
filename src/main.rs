use bandstand::chip::{ChipChannel, Song, SongError, spawn_chip_engine};
use bandstand::coordinator::{MusicCoordinator, SongLoader};
use bandstand::events::{ControlEvent, SoundFxKind};
use bandstand::project::{MusicSettings, Track, TrackKind, TrackLibrary};
use bandstand::waveform::{WaveformEngine, WaveformPlayer};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Stand-in for the tracker synthesis engine so the demo runs without an
/// audio device.
#[derive(Default)]
struct PreviewWaveformEngine {
    playing: bool,
}

impl WaveformEngine for PreviewWaveformEngine {
    fn load(&mut self, path: &Path, disable_speed_conversion: bool) {
        info!(?path, disable_speed_conversion, "waveform engine loading");
        self.playing = true;
    }

    fn stop(&mut self) {
        info!("waveform engine stopped");
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Fabricates songs instead of reading project assets from disk.
struct PreviewLoader;

impl SongLoader for PreviewLoader {
    fn load(&self, path: &Path) -> Result<Song, SongError> {
        info!(?path, "decoding register song");
        Ok(Song {
            version: 1,
            pattern_count: 8,
            data: vec![0; 256],
        })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let library = TrackLibrary {
        tracks: vec![
            Track {
                id: "overworld".into(),
                name: "Overworld".into(),
                kind: TrackKind::Waveform,
                file: "overworld.mod".into(),
                settings: MusicSettings::default(),
            },
            Track {
                id: "boss".into(),
                name: "Boss".into(),
                kind: TrackKind::Register,
                file: "boss.sng".into(),
                settings: MusicSettings::default(),
            },
        ],
    };

    let engine = spawn_chip_engine();
    let waveform: Arc<Mutex<dyn WaveformEngine>> =
        Arc::new(Mutex::new(PreviewWaveformEngine::default()));
    let mut coordinator = MusicCoordinator::new(
        library,
        PathBuf::from("demo-project"),
        WaveformPlayer::new(waveform),
        ChipChannel::new(engine.command_tx, engine.packet_rx),
        Box::new(PreviewLoader),
    );

    coordinator.handle_event(&ControlEvent::PlayMusic {
        track_id: "boss".into(),
    });
    while coordinator.state() == bandstand::PlaybackState::Loading {
        coordinator.pump();
        std::thread::sleep(Duration::from_millis(10));
    }
    info!(state = ?coordinator.state(), "register track started");

    coordinator.handle_event(&ControlEvent::SoundFx(SoundFxKind::Beep { pitch: 60 }));
    info!(state = ?coordinator.state(), "interrupted by sound effect");

    coordinator.handle_event(&ControlEvent::PlayMusic {
        track_id: "overworld".into(),
    });
    info!(state = ?coordinator.state(), "waveform track started");
    coordinator.handle_event(&ControlEvent::PauseMusic);
    info!(state = ?coordinator.state(), "paused");
}
