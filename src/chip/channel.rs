use super::packet::MusicDataPacket;
use crossbeam::channel::{Receiver, Sender};
use tracing::warn;

/// Command half of the wire between the coordinator and the chip engine.
#[derive(Debug, Clone)]
pub enum ChipCommand {
    Open,
    Close,
    Data(MusicDataPacket),
}

/// Identity of a registered packet listener. Revoking the id is a
/// first-class operation: a stale, unrevoked subscription can resurrect a
/// cancelled playback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Bidirectional packet channel to the chip engine, which runs as its own
/// execution context. Commands go out, `MusicDataPacket`s come back.
pub struct ChipChannel {
    command_tx: Sender<ChipCommand>,
    packet_rx: Receiver<MusicDataPacket>,
    subscribers: Vec<SubscriptionId>,
    next_id: u64,
}

impl ChipChannel {
    pub fn new(command_tx: Sender<ChipCommand>, packet_rx: Receiver<MusicDataPacket>) -> Self {
        Self {
            command_tx,
            packet_rx,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn open(&self) {
        self.dispatch(ChipCommand::Open);
    }

    /// Safe to call at any time, including when no session was ever opened.
    pub fn close(&self) {
        self.dispatch(ChipCommand::Close);
    }

    pub fn send(&self, packet: MusicDataPacket) {
        self.dispatch(ChipCommand::Data(packet));
    }

    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(id);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|s| *s != id);
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains(&id)
    }

    /// Non-blocking receive of the next engine packet, if one is pending.
    pub fn try_recv(&self) -> Option<MusicDataPacket> {
        self.packet_rx.try_recv().ok()
    }

    fn dispatch(&self, command: ChipCommand) {
        // The engine thread owning the other end may already be gone
        // during shutdown.
        if self.command_tx.send(command).is_err() {
            warn!("chip engine channel disconnected, command dropped");
        }
    }
}
