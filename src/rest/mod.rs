use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};

use crate::app::Stores;
use crate::stores::{CategoryStore, SessionStore};

mod handlers;
mod models;

use handlers::{
    create_category, delete_category, get_category, health, list_categories, login, logout,
    not_found, session_state, signup, update_category,
};

#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryStore,
    pub session: SessionStore,
    pub started_at: std::time::SystemTime,
}

pub fn router(stores: Stores) -> Router {
    let state = AppState {
        categories: stores.categories,
        session: stores.session,
        started_at: std::time::SystemTime::now(),
    };

    Router::new()
        .route("/health", get(health))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
        .route("/session", get(session_state).delete(logout))
        .route("/session/login", post(login))
        .route("/session/signup", post(signup))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    stores: Stores,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(stores);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 REST listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
