use axum::{
    extract::{Path, Query, State},
    Json,
};
use common::pagination::PageRequest;
use serde::Deserialize;
use serde_json::Value;
use service::records::domain::{ColumnList, ColumnSelection, Page, Record};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::ServerState;

/// Raw query values; parsed leniently so junk falls back to the defaults.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

/// `POST /api/data?page=&pageSize=` with an optional `{ "columns": [...] }` body.
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<PageQuery>,
    body: Option<Json<Value>>,
) -> Result<Json<Page>, ApiError> {
    let req = PageRequest::from_query(q.page.as_deref(), q.page_size.as_deref());
    let columns = ColumnSelection::from_body(body.as_ref().map(|Json(v)| v));
    info!(page = req.page, page_size = req.page_size, columns = ?columns.requested(), "list records");
    let page = state.records.list(req, &columns).await?;
    Ok(Json(page))
}

/// `GET /api/data/:id` — always a JSON array, empty when nothing matches.
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.records.get(&id).await?))
}

/// `GET /api/columns`
pub async fn columns(State(state): State<ServerState>) -> Result<Json<ColumnList>, ApiError> {
    Ok(Json(state.records.columns().await?))
}
