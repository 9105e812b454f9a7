pub mod chip;
pub mod coordinator;
pub mod events;
pub mod policy;
pub mod project;
pub mod waveform;

pub use chip::{ChipChannel, ChipEngineHandle, MusicDataPacket, spawn_chip_engine};
pub use coordinator::{FileSongLoader, MusicCoordinator, NowPlaying, PlaybackState, SongLoader};
pub use events::{ControlEvent, SoundFxKind};
pub use policy::{Interruption, classify};
pub use project::{MusicSettings, Track, TrackKind, TrackLibrary, asset_filename};
pub use waveform::{WaveformEngine, WaveformPlayer};
