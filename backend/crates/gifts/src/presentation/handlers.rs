//! HTTP Handlers
//!
//! No application layer in this crate - the operations are direct
//! repository calls.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::domain::entity::Gift;
use crate::domain::repository::GiftRepository;
use crate::domain::value_object::GiftFilter;
use crate::error::{GiftError, GiftResult};
use crate::presentation::dto::{CreateGiftRequest, GiftResponse, SearchParams};

/// Shared state for gift handlers
#[derive(Clone)]
pub struct GiftState<R>
where
    R: GiftRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /api/gifts
pub async fn list_gifts<R>(State(state): State<GiftState<R>>) -> GiftResult<Json<Vec<GiftResponse>>>
where
    R: GiftRepository + Clone + Send + Sync + 'static,
{
    let gifts = state.repo.list().await?;
    Ok(Json(gifts.iter().map(GiftResponse::from).collect()))
}

/// GET /api/gifts/{id}
pub async fn get_gift<R>(
    State(state): State<GiftState<R>>,
    Path(id): Path<String>,
) -> GiftResult<Json<GiftResponse>>
where
    R: GiftRepository + Clone + Send + Sync + 'static,
{
    let gift = state
        .repo
        .find_by_public_id(&id)
        .await?
        .ok_or(GiftError::GiftNotFound)?;

    Ok(Json(GiftResponse::from(&gift)))
}

/// POST /api/gifts
pub async fn create_gift<R>(
    State(state): State<GiftState<R>>,
    Json(req): Json<CreateGiftRequest>,
) -> GiftResult<impl IntoResponse>
where
    R: GiftRepository + Clone + Send + Sync + 'static,
{
    let gift = Gift::new(
        req.name,
        req.category,
        req.condition,
        req.posted_by,
        req.zipcode,
        req.age_days,
        req.age_years,
        req.description,
        req.image,
    );

    state.repo.create(&gift).await?;

    tracing::info!(gift_id = %gift.gift_id, "Gift created");

    Ok((StatusCode::CREATED, Json(GiftResponse::from(&gift))))
}

/// GET /api/search
///
/// An empty result is an empty array, not an error.
pub async fn search_gifts<R>(
    State(state): State<GiftState<R>>,
    Query(params): Query<SearchParams>,
) -> GiftResult<Json<Vec<GiftResponse>>>
where
    R: GiftRepository + Clone + Send + Sync + 'static,
{
    let filter = GiftFilter::new(
        params.name,
        params.category,
        params.condition,
        params.age_years,
    );

    let gifts = state.repo.search(&filter).await?;
    Ok(Json(gifts.iter().map(GiftResponse::from).collect()))
}
