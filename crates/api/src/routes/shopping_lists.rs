//! Shopping list command and query endpoints.
//!
//! These mirror the command channel one-to-one: the HTTP layer fabricates
//! the same typed commands the message translator produces, including
//! generating the new list id on create.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::ShoppingListId;
use domain::{
    AssignShoppingList, CancelShoppingList, CompleteShoppingList, CreateShoppingList, DepotApp,
    GetShoppingList, OrderItem, ShoppingList,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<A: DepotApp> {
    pub app: A,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateShoppingListRequest {
    pub order_id: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub store_id: String,
    pub quantity: i32,
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub bot_id: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct ShoppingListCreatedResponse {
    pub id: String,
}

#[derive(Serialize)]
pub struct ShoppingListResponse {
    pub id: String,
    pub order_id: String,
    pub status: String,
    pub assigned_bot_id: Option<String>,
    pub stops: Vec<StopResponse>,
}

#[derive(Serialize)]
pub struct StopResponse {
    pub store_id: String,
    pub store_name: String,
    pub store_location: String,
    pub items: Vec<ItemResponse>,
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub product_id: String,
    pub name: String,
    pub quantity: i32,
}

fn snapshot_response(list: &ShoppingList) -> ShoppingListResponse {
    let mut stops: Vec<StopResponse> = list
        .stops()
        .iter()
        .map(|(store_id, stop)| {
            let mut items: Vec<ItemResponse> = stop
                .items
                .iter()
                .map(|(product_id, item)| ItemResponse {
                    product_id: product_id.as_str().to_string(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                })
                .collect();
            items.sort_by(|a, b| a.product_id.cmp(&b.product_id));
            StopResponse {
                store_id: store_id.as_str().to_string(),
                store_name: stop.store_name.clone(),
                store_location: stop.store_location.clone(),
                items,
            }
        })
        .collect();
    stops.sort_by(|a, b| a.store_id.cmp(&b.store_id));

    ShoppingListResponse {
        id: list.id().to_string(),
        order_id: list.order_id().as_str().to_string(),
        status: list.status().to_string(),
        assigned_bot_id: list.assigned_bot_id().map(|b| b.as_str().to_string()),
        stops,
    }
}

fn parse_id(raw: &str) -> Result<ShoppingListId, ApiError> {
    ShoppingListId::parse(raw)
        .map_err(|e| ApiError::BadRequest(format!("invalid shopping list id: {e}")))
}

// -- Handlers --

/// POST /shopping-lists — create a shopping list from an order's items.
#[tracing::instrument(skip(state, req))]
pub async fn create<A: DepotApp + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Json(req): Json<CreateShoppingListRequest>,
) -> Result<(axum::http::StatusCode, Json<ShoppingListCreatedResponse>), ApiError> {
    let id = ShoppingListId::new();
    let items = req
        .items
        .iter()
        .map(|i| OrderItem::new(i.product_id.as_str(), i.store_id.as_str(), i.quantity))
        .collect();

    state
        .app
        .create_shopping_list(CreateShoppingList::new(id, req.order_id, items))
        .await?;
    metrics::counter!("depot_shopping_lists_created_total").increment(1);

    Ok((
        axum::http::StatusCode::CREATED,
        Json(ShoppingListCreatedResponse { id: id.to_string() }),
    ))
}

/// GET /shopping-lists/:id — read-only snapshot of a list.
#[tracing::instrument(skip(state))]
pub async fn get<A: DepotApp + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingListResponse>, ApiError> {
    let id = parse_id(&id)?;
    let list = state.app.get_shopping_list(GetShoppingList::new(id)).await?;
    Ok(Json(snapshot_response(&list)))
}

/// POST /shopping-lists/:id/cancel — cancel a list.
#[tracing::instrument(skip(state))]
pub async fn cancel<A: DepotApp + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingListResponse>, ApiError> {
    let id = parse_id(&id)?;
    state
        .app
        .cancel_shopping_list(CancelShoppingList::new(id))
        .await?;
    metrics::counter!("depot_shopping_lists_canceled_total").increment(1);

    let list = state.app.get_shopping_list(GetShoppingList::new(id)).await?;
    Ok(Json(snapshot_response(&list)))
}

/// POST /shopping-lists/:id/assign — assign a fulfillment bot.
#[tracing::instrument(skip(state, req))]
pub async fn assign<A: DepotApp + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Path(id): Path<String>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<ShoppingListResponse>, ApiError> {
    let id = parse_id(&id)?;
    state
        .app
        .assign_shopping_list(AssignShoppingList::new(id, req.bot_id))
        .await?;

    let list = state.app.get_shopping_list(GetShoppingList::new(id)).await?;
    Ok(Json(snapshot_response(&list)))
}

/// POST /shopping-lists/:id/complete — mark a list completed.
#[tracing::instrument(skip(state))]
pub async fn complete<A: DepotApp + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingListResponse>, ApiError> {
    let id = parse_id(&id)?;
    state
        .app
        .complete_shopping_list(CompleteShoppingList::new(id))
        .await?;
    metrics::counter!("depot_shopping_lists_completed_total").increment(1);

    let list = state.app.get_shopping_list(GetShoppingList::new(id)).await?;
    Ok(Json(snapshot_response(&list)))
}
