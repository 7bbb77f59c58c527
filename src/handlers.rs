use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    error::{AppError, AppResult},
    models::{CreateItemRequest, Item, ListItemsQuery, Page, Stats},
    query::{self, PageParams},
    state::AppState,
};

pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/items?q=&page=&limit=
pub async fn list_items(
    State(state): State<AppState>,
    Query(raw): Query<ListItemsQuery>,
) -> AppResult<Json<Page>> {
    let params = PageParams::from(&raw);
    let items = state.store.read_all().await?;
    Ok(Json(query::paginate(&items, &params)))
}

/// GET /api/items/{id}
///
/// A non-numeric id segment can't match any record, so it resolves to the
/// same 404 as an unknown id.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Item>> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Item not found"))?;

    let items = state.store.read_all().await?;
    let item = query::find_by_id(&items, id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Item not found"))?;

    Ok(Json(item))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<Item>)> {
    if payload.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
        return Err(AppError::validation("Invalid item payload"));
    }

    let item = state.store.append_and_persist(payload).await?;

    // The aggregate view changed; recompute off the request path. A
    // refresh failure must never fail the write that triggered it.
    state.stats.refresh_detached("item appended");

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<Stats>> {
    let stats = state.stats.get().await?;
    Ok(Json(stats))
}

pub async fn route_not_found() -> AppError {
    AppError::not_found("Route Not Found")
}
