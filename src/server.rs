use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::record::ConnectionRecord;
use crate::store::SnapshotStore;

#[derive(Clone)]
struct AppState {
    store: SnapshotStore,
}

pub fn router(store: SnapshotStore) -> Router {
    Router::new()
        .route("/", get(list_connections))
        .layer(CorsLayer::permissive())
        .with_state(AppState { store })
}

pub async fn serve(listener: TcpListener, store: SnapshotStore) -> anyhow::Result<()> {
    info!(
        "serving {} connections on {}",
        store.len(),
        listener.local_addr()?
    );
    axum::serve(listener, router(store)).await?;
    Ok(())
}

async fn list_connections(State(state): State<AppState>) -> Json<Arc<[ConnectionRecord]>> {
    Json(state.store.shared())
}
