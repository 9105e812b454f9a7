use crate::project::MusicSettings;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// The tracker-module synthesis engine. Implemented outside this crate; the
/// instance is created once during environment setup and shared by
/// reference for the lifetime of the editor.
pub trait WaveformEngine: Send {
    /// Loading implies playback: the engine starts playing as soon as the
    /// module is ready.
    fn load(&mut self, path: &Path, disable_speed_conversion: bool);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// Adapter the coordinator drives for waveform-kind tracks.
pub struct WaveformPlayer {
    engine: Arc<Mutex<dyn WaveformEngine>>,
}

impl WaveformPlayer {
    pub fn new(engine: Arc<Mutex<dyn WaveformEngine>>) -> Self {
        Self { engine }
    }

    /// Load and start a module. The speed-conversion flag is fixed for the
    /// whole session; changing it requires a new load.
    pub fn load_and_play(&self, path: &Path, settings: &MusicSettings) {
        self.engine
            .lock()
            .load(path, settings.disable_speed_conversion);
    }

    /// Stops the engine only when it is actually playing, so an engine that
    /// dislikes redundant stops never sees one.
    pub fn stop(&self) {
        let mut engine = self.engine.lock();
        if engine.is_playing() {
            engine.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.engine.lock().is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingEngine {
        loads: Vec<(PathBuf, bool)>,
        stops: usize,
        playing: bool,
    }

    impl WaveformEngine for RecordingEngine {
        fn load(&mut self, path: &Path, disable_speed_conversion: bool) {
            self.loads.push((path.to_path_buf(), disable_speed_conversion));
            self.playing = true;
        }

        fn stop(&mut self) {
            self.stops += 1;
            self.playing = false;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    #[test]
    fn load_passes_settings_through() {
        let engine = Arc::new(Mutex::new(RecordingEngine::default()));
        let player = WaveformPlayer::new(engine.clone());
        player.load_and_play(
            Path::new("/proj/assets/music/a.mod"),
            &MusicSettings {
                disable_speed_conversion: true,
            },
        );
        let engine = engine.lock();
        assert_eq!(
            engine.loads,
            vec![(PathBuf::from("/proj/assets/music/a.mod"), true)]
        );
        assert!(engine.playing);
    }

    #[test]
    fn stop_is_skipped_when_not_playing() {
        let engine = Arc::new(Mutex::new(RecordingEngine::default()));
        let player = WaveformPlayer::new(engine.clone());
        player.stop();
        assert_eq!(engine.lock().stops, 0);

        player.load_and_play(Path::new("a.mod"), &MusicSettings::default());
        player.stop();
        player.stop();
        assert_eq!(engine.lock().stops, 1);
    }
}
