//! In-memory room state: per-room message history plus the broadcast
//! channel that fans newly appended messages out to joined sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::rooms::ChatMessage;

// Receivers that fall this far behind skip messages (RecvError::Lagged).
const CHANNEL_CAPACITY: usize = 256;

struct RoomState {
    history: Vec<ChatMessage>,
    tx: broadcast::Sender<ChatMessage>,
}

impl RoomState {
    fn new() -> Self {
        Self {
            history: Vec::new(),
            tx: broadcast::channel(CHANNEL_CAPACITY).0,
        }
    }
}

/// Process-wide room → history mapping. Rooms are created implicitly on
/// first join or first accepted message and live until the process exits.
///
/// Every mutation completes under a single lock acquisition with no await
/// points, so a join's history snapshot and the live fanout stream partition
/// the room's messages exactly: each message lands in one or the other.
#[derive(Clone, Default)]
pub struct RoomStore {
    rooms: Arc<Mutex<HashMap<String, RoomState>>>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure<'a>(rooms: &'a mut HashMap<String, RoomState>, name: &str) -> &'a mut RoomState {
        rooms.entry(name.to_owned()).or_insert_with(RoomState::new)
    }

    pub fn ensure_room(&self, name: &str) {
        let mut rooms = self.rooms.lock().unwrap();
        Self::ensure(&mut rooms, name);
    }

    /// Appends to the room's history and delivers to every current
    /// subscriber, creating the room if needed.
    pub fn append(&self, name: &str, message: ChatMessage) {
        let mut rooms = self.rooms.lock().unwrap();
        let room = Self::ensure(&mut rooms, name);
        room.history.push(message.clone());
        let _ = room.tx.send(message);
    }

    /// The room's history in append order; empty if the room is unknown.
    pub fn messages(&self, name: &str) -> Vec<ChatMessage> {
        self.rooms
            .lock()
            .unwrap()
            .get(name)
            .map(|room| room.history.clone())
            .unwrap_or_default()
    }

    /// Every room name joined or messaged at least once, in no particular order.
    pub fn room_names(&self) -> Vec<String> {
        self.rooms.lock().unwrap().keys().cloned().collect()
    }

    /// Joins a room: returns its history snapshot, the room directory, and a
    /// fresh subscription for messages appended after the snapshot.
    pub fn join(&self, name: &str) -> (Vec<ChatMessage>, Vec<String>, broadcast::Receiver<ChatMessage>) {
        let mut rooms = self.rooms.lock().unwrap();
        let room = Self::ensure(&mut rooms, name);
        let history = room.history.clone();
        let rx = room.tx.subscribe();
        let names = rooms.keys().cloned().collect();
        (history, names, rx)
    }
}
