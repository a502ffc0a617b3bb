use axum::{
    debug_handler,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use log::{debug, info};
use tokio::sync::broadcast;

use crate::rooms::msg::{self, ClientEvent, ServerEvent};
use crate::store::RoomStore;

#[debug_handler(state = crate::AppState)]
pub(crate) async fn chat_ws(State(store): State<RoomStore>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |stream| relay_session(stream, store))
}

/// One connected client. The session is a member of at most one room at a
/// time: membership is the broadcast subscription it currently holds, and a
/// later join replaces it. Disconnecting drops the subscription; room data
/// is untouched.
async fn relay_session(stream: WebSocket, store: RoomStore) {
    info!("client connected");

    let (mut sender, mut receiver) = stream.split();
    let mut subscription: Option<broadcast::Receiver<msg::ChatMessage>> = None;

    loop {
        tokio::select! {
            inbound = receiver.next() => {
                let Some(Ok(frame)) = inbound else { break };
                let Ok(event) = serde_json::from_slice(&frame.into_data()) else {
                    continue
                };

                match event {
                    ClientEvent::JoinRoom { room } => {
                        if room.is_empty() {
                            continue;
                        }

                        let (messages, rooms, rx) = store.join(&room);
                        subscription = Some(rx);

                        if send_event(&mut sender, &ServerEvent::Messages { messages }).await.is_err()
                            || send_event(&mut sender, &ServerEvent::Rooms { rooms }).await.is_err()
                        {
                            break;
                        }
                    }
                    ClientEvent::SendMessage(input) => msg::send_msg(&store, input),
                }
            }
            delivered = async { subscription.as_mut().unwrap().recv().await }, if subscription.is_some() => {
                match delivered {
                    Ok(message) => {
                        if send_event(&mut sender, &ServerEvent::NewMessage { message }).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("session lagged behind, skipped {skipped} messages");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        subscription = None;
                    }
                }
            }
        }
    }

    info!("client disconnected");
}

async fn send_event(sender: &mut SplitSink<WebSocket, Message>, event: &ServerEvent) -> anyhow::Result<()> {
    let frame = serde_json::to_string(event)?;
    sender.send(frame.into()).await?;
    Ok(())
}
