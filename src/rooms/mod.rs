mod history;
mod msg;
mod ws;

pub use msg::{ChatMessage, FileAttachment};

use axum::{Router, routing::get};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(history::list_rooms))
        .route("/rooms/{room}/messages", get(history::room_messages))
        .route("/ws", get(ws::chat_ws))
}
