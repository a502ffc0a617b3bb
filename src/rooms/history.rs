use axum::{
    Json, debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::store::RoomStore;

#[derive(Serialize)]
pub(crate) struct RoomsResponse {
    rooms: Vec<String>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn list_rooms(State(store): State<RoomStore>) -> Json<RoomsResponse> {
    Json(RoomsResponse { rooms: store.room_names() })
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn room_messages(
    Path(room): Path<String>,
    State(store): State<RoomStore>,
) -> Response {
    if !valid_room_name(&room) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid room parameter" })),
        )
            .into_response();
    }

    Json(store.messages(&room)).into_response()
}

// Path parameters only: letters, digits, underscores and hyphens, non-empty.
// Rooms joined over the realtime channel are not held to this.
pub(crate) fn valid_room_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::valid_room_name;
    use crate::rooms::ChatMessage;
    use crate::store::RoomStore;

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get(store: RoomStore, uri: &str) -> axum::response::Response {
        crate::app(store)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[test]
    fn room_name_filter() {
        assert!(valid_room_name("general"));
        assert!(valid_room_name("Room_42-a"));
        assert!(!valid_room_name(""));
        assert!(!valid_room_name("a b"));
        assert!(!valid_room_name("a/b"));
        assert!(!valid_room_name("café"));
    }

    #[tokio::test]
    async fn lists_known_rooms() {
        let store = RoomStore::new();
        store.ensure_room("general");

        let response = get(store, "/rooms").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({ "rooms": ["general"] }));
    }

    #[tokio::test]
    async fn untouched_room_reads_as_empty_history() {
        let response = get(RoomStore::new(), "/rooms/ghost/messages").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn malformed_room_name_is_rejected() {
        let response = get(RoomStore::new(), "/rooms/a%20b/messages").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Invalid room parameter");
    }

    #[tokio::test]
    async fn history_comes_back_in_append_order() {
        let store = RoomStore::new();
        store.append(
            "general",
            ChatMessage {
                user: "alice".to_owned(),
                text: Some("one".to_owned()),
                image: None,
                video: None,
                audio: None,
                file: None,
            },
        );
        store.append(
            "general",
            ChatMessage {
                user: "bob".to_owned(),
                text: None,
                image: Some("data:image/png;base64,AAAA".to_owned()),
                video: None,
                audio: None,
                file: None,
            },
        );

        let response = get(store, "/rooms/general/messages").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!([
                { "user": "alice", "text": "one" },
                { "user": "bob", "image": "data:image/png;base64,AAAA" },
            ])
        );
    }
}
