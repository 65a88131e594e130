//! Gift Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::GiftRepository;
use crate::infra::postgres::PgGiftRepository;
use crate::presentation::handlers::{self, GiftState};

/// Create the gifts router with PostgreSQL repository
pub fn gift_router(repo: PgGiftRepository) -> Router {
    gift_router_generic(repo)
}

/// Create the search router with PostgreSQL repository
pub fn search_router(repo: PgGiftRepository) -> Router {
    search_router_generic(repo)
}

/// Create a generic gifts router for any repository implementation
pub fn gift_router_generic<R>(repo: R) -> Router
where
    R: GiftRepository + Clone + Send + Sync + 'static,
{
    let state = GiftState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::list_gifts::<R>))
        .route("/", post(handlers::create_gift::<R>))
        .route("/{id}", get(handlers::get_gift::<R>))
        .with_state(state)
}

/// Create a generic search router for any repository implementation
pub fn search_router_generic<R>(repo: R) -> Router
where
    R: GiftRepository + Clone + Send + Sync + 'static,
{
    let state = GiftState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::search_gifts::<R>))
        .with_state(state)
}
