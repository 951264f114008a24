use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::{CreateItem, Item, PatchItem, ReplaceItem},
    services::{ServiceContext, item_service::ItemService},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item)
                .put(replace_item)
                .patch(patch_item)
                .delete(delete_item),
        )
        .with_state(state)
}

async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Item>>, AppError> {
    let items = item_service_from_state(state.as_ref()).list().await?;
    Ok(Json(items.into_iter().map(Item::from).collect()))
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateItem>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let item = item_service_from_state(state.as_ref()).create(body).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(&id)?;
    let item = item_service_from_state(state.as_ref()).get(id).await?;
    Ok(Json(item.into()))
}

async fn replace_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ReplaceItem>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(&id)?;
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let item = item_service_from_state(state.as_ref())
        .replace(id, body)
        .await?;
    Ok(Json(item.into()))
}

async fn patch_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<PatchItem>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(&id)?;
    let Json(body) = payload.map_err(|_| AppError::bad_request("Invalid JSON format"))?;
    let item = item_service_from_state(state.as_ref())
        .patch(id, body)
        .await?;
    Ok(Json(item.into()))
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    item_service_from_state(state.as_ref())
        .soft_delete(id)
        .await?;
    Ok(Json(MessageResponse {
        message: "Item deleted".to_string(),
    }))
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request("Invalid id"))
}

fn item_service_from_state(state: &AppState) -> ItemService {
    ServiceContext::from_state(state).item()
}
