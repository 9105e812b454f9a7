/// Decoded register-format song. The channel treats this as an opaque
/// payload; only the chip engine interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub version: u32,
    pub pattern_count: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketAction {
    Initialized,
    Play,
    Stop,
}

/// One message exchanged with the chip engine. `song` and `position`
/// (pattern index, row index) are only present on `Play`.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicDataPacket {
    pub action: PacketAction,
    pub song: Option<Song>,
    pub position: Option<(u32, u32)>,
}

impl MusicDataPacket {
    pub fn initialized() -> Self {
        Self {
            action: PacketAction::Initialized,
            song: None,
            position: None,
        }
    }

    pub fn play(song: Song, position: (u32, u32)) -> Self {
        Self {
            action: PacketAction::Play,
            song: Some(song),
            position: Some(position),
        }
    }

    pub fn stop() -> Self {
        Self {
            action: PacketAction::Stop,
            song: None,
            position: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SongError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a register song file (bad magic)")]
    BadMagic,
    #[error("register song file truncated")]
    Truncated,
}

const SONG_MAGIC: &[u8; 4] = b"SONG";

/// Decodes a register-format song blob. Stands in for the full tracker
/// format decoder, which lives outside this crate; it validates the header
/// and carries the pattern payload through untouched.
pub fn decode_song(bytes: &[u8]) -> Result<Song, SongError> {
    if bytes.len() < 12 {
        return Err(SongError::Truncated);
    }
    if &bytes[0..4] != SONG_MAGIC {
        return Err(SongError::BadMagic);
    }
    let version = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    let pattern_count = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    Ok(Song {
        version,
        pattern_count,
        data: bytes[12..].to_vec(),
    })
}
