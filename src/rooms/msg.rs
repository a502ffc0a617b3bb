use log::debug;
use serde::{Deserialize, Serialize};

use crate::store::RoomStore;

/// A named file payload, forwarded opaquely (`data` is whatever encoding the
/// sender chose, typically a data URI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub data: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One immutable chat message. Payload fields that were not supplied stay
/// absent on the wire; consumers branch on key presence, not emptiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileAttachment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SendMessage {
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub user: String,
    pub text: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub audio: Option<String>,
    pub file: Option<FileAttachment>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum ClientEvent {
    JoinRoom { room: String },
    SendMessage(SendMessage),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum ServerEvent {
    Messages { messages: Vec<ChatMessage> },
    Rooms { rooms: Vec<String> },
    NewMessage { message: ChatMessage },
}

/// Validates and submits one message: accepted messages are appended to the
/// room and fanned out to its members, rejected ones are silently dropped
/// (the protocol has no error event back to the sender).
pub(crate) fn send_msg(
    store: &RoomStore,
    SendMessage { room, user, text, image, video, audio, file }: SendMessage,
) {
    // empty strings count as absent, same as the client omitting the field
    let text = text.filter(|t| !t.is_empty());
    let image = image.filter(|i| !i.is_empty());
    let video = video.filter(|v| !v.is_empty());
    let audio = audio.filter(|a| !a.is_empty());

    if room.is_empty() || user.is_empty() {
        debug!("dropping message without room or author");
        return;
    }
    if text.is_none() && image.is_none() && video.is_none() && audio.is_none() && file.is_none() {
        debug!("dropping message without any payload");
        return;
    }

    store.append(&room, ChatMessage { user, text, image, video, audio, file });
}
