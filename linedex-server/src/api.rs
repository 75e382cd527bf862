use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use linedex_core::{IndexStats, LetterJumpMap};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::page::PageParams;
use crate::state::AppState;

/// Raw `/users` query; values are normalized by [`PageParams`], never rejected
#[derive(Deserialize, Debug, Default)]
pub struct UsersQuery {
    skip: Option<String>,
    limit: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_lines: u64,
    pub skip: u64,
    pub limit: usize,
}

#[derive(Serialize, Debug)]
pub struct UsersResponse {
    pub users: Vec<String>,
    pub meta: PageMeta,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AlphabetResponse {
    pub alphabet_map: LetterJumpMap,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", get(users))
        .route("/alphabet", get(alphabet))
        .route("/stats", get(stats))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersResponse>, ApiError> {
    let page = PageParams::from_raw(query.skip.as_deref(), query.limit.as_deref());
    tracing::debug!(skip = page.skip, limit = page.limit.get(), "users page");

    let users = state.index.get_lines_async(page.skip, page.limit).await?;
    Ok(Json(UsersResponse {
        users,
        meta: PageMeta {
            total_lines: state.index.total_lines(),
            skip: page.skip,
            limit: page.limit.get(),
        },
    }))
}

async fn alphabet(State(state): State<Arc<AppState>>) -> Json<AlphabetResponse> {
    Json(AlphabetResponse {
        alphabet_map: state.index.letters().clone(),
    })
}

async fn stats(State(state): State<Arc<AppState>>) -> Json<IndexStats> {
    Json(state.index.stats())
}

async fn health() -> &'static str {
    "OK"
}
