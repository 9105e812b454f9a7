use super::channel::ChipCommand;
use super::packet::{MusicDataPacket, PacketAction};
use crossbeam::channel::{Receiver, Sender};
use tracing::{debug, warn};

/// Endpoints handed back to the coordinator side after spawning the engine.
pub struct ChipEngineHandle {
    pub command_tx: Sender<ChipCommand>,
    pub packet_rx: Receiver<MusicDataPacket>,
}

/// Spawns the chip-emulation engine on its own thread and returns the
/// channel endpoints for it.
///
/// This is a preview stand-in for the real out-of-process emulator. It
/// speaks the same protocol: an `Initialized` packet after each `Open`, and
/// playback driven entirely by incoming `Play`/`Stop` packets.
pub fn spawn_chip_engine() -> ChipEngineHandle {
    let (command_tx, command_rx) = crossbeam::channel::unbounded();
    let (packet_tx, packet_rx) = crossbeam::channel::unbounded();

    std::thread::spawn(move || {
        engine_thread(command_rx, packet_tx);
    });

    ChipEngineHandle {
        command_tx,
        packet_rx,
    }
}

struct EngineState {
    open: bool,
    playing: bool,
}

fn engine_thread(command_rx: Receiver<ChipCommand>, packet_tx: Sender<MusicDataPacket>) {
    let mut state = EngineState {
        open: false,
        playing: false,
    };

    loop {
        match command_rx.recv() {
            Ok(ChipCommand::Open) => {
                state.open = true;
                state.playing = false;
                debug!("chip engine opened");
                let _ = packet_tx.send(MusicDataPacket::initialized());
            }
            Ok(ChipCommand::Close) => {
                state.open = false;
                debug!(was_playing = state.playing, "chip engine closed");
                state.playing = false;
            }
            Ok(ChipCommand::Data(packet)) => match packet.action {
                PacketAction::Play => {
                    if !state.open {
                        warn!("play packet received while channel closed, ignoring");
                        continue;
                    }
                    match (&packet.song, packet.position) {
                        (Some(song), Some(position)) => {
                            state.playing = true;
                            debug!(
                                patterns = song.pattern_count,
                                pattern = position.0,
                                row = position.1,
                                "chip engine playing"
                            );
                        }
                        _ => warn!("play packet missing song or position"),
                    }
                }
                PacketAction::Stop => {
                    state.playing = false;
                    debug!("chip engine stopped");
                }
                PacketAction::Initialized => {
                    // Engine-to-coordinator only; ignore if echoed back.
                }
            },
            Err(crossbeam::channel::RecvError) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::packet::Song;
    use std::time::Duration;

    #[test]
    fn open_emits_initialized() {
        let engine = spawn_chip_engine();
        engine.command_tx.send(ChipCommand::Open).unwrap();
        let packet = engine
            .packet_rx
            .recv_timeout(Duration::from_secs(1))
            .unwrap();
        assert_eq!(packet.action, PacketAction::Initialized);
    }

    #[test]
    fn reopen_emits_initialized_again() {
        let engine = spawn_chip_engine();
        engine.command_tx.send(ChipCommand::Open).unwrap();
        engine.command_tx.send(ChipCommand::Close).unwrap();
        engine.command_tx.send(ChipCommand::Open).unwrap();

        let mut initialized = 0;
        while let Ok(packet) = engine.packet_rx.recv_timeout(Duration::from_millis(500)) {
            if packet.action == PacketAction::Initialized {
                initialized += 1;
            }
            if initialized == 2 {
                break;
            }
        }
        assert_eq!(initialized, 2);
    }

    #[test]
    fn play_packet_is_accepted_while_open() {
        let engine = spawn_chip_engine();
        engine.command_tx.send(ChipCommand::Open).unwrap();
        let song = Song {
            version: 1,
            pattern_count: 4,
            data: vec![],
        };
        engine
            .command_tx
            .send(ChipCommand::Data(MusicDataPacket::play(song, (0, 0))))
            .unwrap();
        // Nothing comes back for a play packet; the engine must simply not
        // drop the channel.
        engine.command_tx.send(ChipCommand::Close).unwrap();
        assert!(
            engine
                .packet_rx
                .recv_timeout(Duration::from_secs(1))
                .is_ok()
        );
    }
}
