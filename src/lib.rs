pub mod rooms;
pub mod store;

use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method},
};
use tower_http::cors::CorsLayer;

use crate::store::RoomStore;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: RoomStore,
}

pub fn app(store: RoomStore) -> Router {
    // the dev frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:5173".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST]);

    rooms::router()
        .with_state(AppState { store })
        .layer(cors)
}
