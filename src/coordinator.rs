use crate::chip::{ChipChannel, MusicDataPacket, PacketAction, Song, SongError, SubscriptionId};
use crate::events::ControlEvent;
use crate::policy::{self, Interruption};
use crate::project::{TrackKind, TrackLibrary, asset_filename};
use crate::waveform::WaveformPlayer;
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
    Paused,
}

/// Lock-free snapshot of the coordinator for UI readers.
#[derive(Debug, Clone)]
pub struct NowPlaying {
    pub state: PlaybackState,
    pub track_id: Option<String>,
}

/// Reads and decodes a register-format song file. The real decoder lives
/// with the project's file I/O layer; it also owns error reporting for
/// malformed files.
pub trait SongLoader {
    fn load(&self, path: &Path) -> Result<Song, SongError>;
}

pub struct FileSongLoader;

impl SongLoader for FileSongLoader {
    fn load(&self, path: &Path) -> Result<Song, SongError> {
        let bytes = std::fs::read(path)?;
        crate::chip::decode_song(&bytes)
    }
}

/// Start-playback handshake with the chip engine.
///
/// The one-shot subscription in `AwaitingInit` is revoked on every exit
/// from that state, so a stale `Initialized` can never resurrect a
/// cancelled request.
enum Handshake {
    Idle,
    AwaitingInit { sub: SubscriptionId, song: Song },
}

/// Serializes music playback across the two backends. Exactly one backend
/// session is active at any time; every new request tears down the previous
/// session before starting.
pub struct MusicCoordinator {
    library: TrackLibrary,
    project_root: PathBuf,
    waveform: WaveformPlayer,
    channel: ChipChannel,
    loader: Box<dyn SongLoader>,
    state: PlaybackState,
    handshake: Handshake,
    current_track: Option<String>,
    now_playing: Arc<ArcSwap<NowPlaying>>,
}

impl MusicCoordinator {
    pub fn new(
        library: TrackLibrary,
        project_root: PathBuf,
        waveform: WaveformPlayer,
        channel: ChipChannel,
        loader: Box<dyn SongLoader>,
    ) -> Self {
        let now_playing = Arc::new(ArcSwap::from_pointee(NowPlaying {
            state: PlaybackState::Idle,
            track_id: None,
        }));
        Self {
            library,
            project_root,
            waveform,
            channel,
            loader,
            state: PlaybackState::Idle,
            handshake: Handshake::Idle,
            current_track: None,
            now_playing,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Snapshot handle for other contexts (UI) to read without locking.
    pub fn now_playing(&self) -> Arc<ArcSwap<NowPlaying>> {
        Arc::clone(&self.now_playing)
    }

    /// Entry point for the dispatch bus. Play/pause route directly; every
    /// other event goes through the interruption policy.
    pub fn handle_event(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::PlayMusic { track_id } => self.handle_play(track_id),
            ControlEvent::PauseMusic => self.handle_pause(),
            other => {
                if policy::classify(other) == Interruption::Pause {
                    self.handle_pause();
                }
            }
        }
    }

    /// Resolves and starts a track. An unknown id is a no-op: a request for
    /// a deleted or renamed track must not break playback.
    pub fn handle_play(&mut self, track_id: &str) {
        let Some(track) = self.library.lookup(track_id).cloned() else {
            debug!(track_id, "play request for unknown track, ignoring");
            return;
        };

        self.stop_active_session();
        self.state = PlaybackState::Idle;
        self.current_track = None;

        let path = asset_filename(&self.project_root, "music", &track);
        match track.kind {
            TrackKind::Waveform => {
                self.waveform.load_and_play(&path, &track.settings);
                self.state = PlaybackState::Playing;
                self.current_track = Some(track.id);
            }
            TrackKind::Register => match self.loader.load(&path) {
                Ok(song) => {
                    // Decode finished before the subscription exists, and the
                    // subscription exists before the channel opens. Either
                    // ordering flipped can lose the `Initialized` signal.
                    let sub = self.channel.subscribe();
                    self.handshake = Handshake::AwaitingInit { sub, song };
                    self.channel.open();
                    self.state = PlaybackState::Loading;
                    self.current_track = Some(track.id);
                }
                Err(err) => {
                    warn!(track_id, error = %err, "register song failed to load");
                }
            },
        }
        self.publish();
    }

    /// Stops whichever backend is active. Idempotent; the channel close also
    /// cancels a session still in `Loading`.
    pub fn handle_pause(&mut self) {
        let was_active = matches!(self.state, PlaybackState::Loading | PlaybackState::Playing);
        self.stop_active_session();
        if was_active {
            self.state = PlaybackState::Paused;
        }
        self.publish();
    }

    /// Drains packets from the chip engine and advances the handshake.
    /// Call from the owning event loop whenever it wakes.
    pub fn pump(&mut self) {
        while let Some(packet) = self.channel.try_recv() {
            self.on_packet(packet);
        }
    }

    fn on_packet(&mut self, packet: MusicDataPacket) {
        match packet.action {
            PacketAction::Initialized => {
                let Handshake::AwaitingInit { sub, song } =
                    std::mem::replace(&mut self.handshake, Handshake::Idle)
                else {
                    debug!("initialized packet with no pending handshake, ignoring");
                    return;
                };
                if !self.channel.is_subscribed(sub) {
                    return;
                }
                self.channel.send(MusicDataPacket::play(song, (0, 0)));
                // One-shot: revoke before any further packet is looked at,
                // so an unrelated re-init cannot re-trigger playback.
                self.channel.unsubscribe(sub);
                self.state = PlaybackState::Playing;
                self.publish();
            }
            other => debug!(?other, "unhandled engine packet"),
        }
    }

    /// Tears down both backends. Safe to call in any state: the waveform
    /// stop is guarded by `is_playing`, the channel close is accepted by the
    /// engine at any time.
    fn stop_active_session(&mut self) {
        if let Handshake::AwaitingInit { sub, .. } =
            std::mem::replace(&mut self.handshake, Handshake::Idle)
        {
            self.channel.unsubscribe(sub);
        }
        self.waveform.stop();
        self.channel.close();
    }

    fn publish(&self) {
        self.now_playing.store(Arc::new(NowPlaying {
            state: self.state,
            track_id: self.current_track.clone(),
        }));
    }
}
