mod channel;
mod engine;
mod packet;

pub use channel::{ChipChannel, ChipCommand, SubscriptionId};
pub use engine::{ChipEngineHandle, spawn_chip_engine};
pub use packet::{MusicDataPacket, PacketAction, Song, SongError, decode_song};
