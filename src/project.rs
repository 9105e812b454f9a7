use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    Waveform,
    Register,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MusicSettings {
    #[serde(default)]
    pub disable_speed_conversion: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub kind: TrackKind,
    pub file: String,
    #[serde(default)]
    pub settings: MusicSettings,
}

/// All music tracks known to the open project, loaded from `music.ron`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackLibrary {
    pub tracks: Vec<Track>,
}

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("RON serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

impl TrackLibrary {
    pub fn lookup(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let ron_string = fs::read_to_string(path)?;
        let library: TrackLibrary = ron::from_str(&ron_string)?;
        Ok(library)
    }

    pub fn save(&self, path: &Path) -> Result<(), LibraryError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, ron_string)?;
        Ok(())
    }
}

/// Resolves a track's playback file below the project root, e.g.
/// `<root>/assets/music/intro.mod`.
pub fn asset_filename(project_root: &Path, category: &str, track: &Track) -> PathBuf {
    project_root.join("assets").join(category).join(&track.file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_library() -> TrackLibrary {
        TrackLibrary {
            tracks: vec![
                Track {
                    id: "t1".into(),
                    name: "Overworld".into(),
                    kind: TrackKind::Waveform,
                    file: "overworld.mod".into(),
                    settings: MusicSettings::default(),
                },
                Track {
                    id: "t2".into(),
                    name: "Boss".into(),
                    kind: TrackKind::Register,
                    file: "boss.uge".into(),
                    settings: MusicSettings::default(),
                },
            ],
        }
    }

    #[test]
    fn lookup_by_id() {
        let library = sample_library();
        assert_eq!(library.lookup("t2").unwrap().name, "Boss");
        assert!(library.lookup("missing").is_none());
    }

    #[test]
    fn asset_path_is_rooted() {
        let library = sample_library();
        let track = library.lookup("t1").unwrap();
        let path = asset_filename(Path::new("/proj"), "music", track);
        assert_eq!(path, PathBuf::from("/proj/assets/music/overworld.mod"));
    }

    #[test]
    fn ron_round_trip() {
        let library = sample_library();
        let text = ron::ser::to_string_pretty(&library, ron::ser::PrettyConfig::default())
            .unwrap();
        let parsed: TrackLibrary = ron::from_str(&text).unwrap();
        assert_eq!(parsed.tracks.len(), 2);
        assert_eq!(parsed.tracks[1].kind, TrackKind::Register);
    }
}
