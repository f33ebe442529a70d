//! API handlers

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::{ApiError, AppState};
use crate::types::TransportationOrder;
use crate::Error;

/// Health check with order count
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let orders = state.repository.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        orders,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub orders: usize,
}

/// List every order
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransportationOrder>>, ApiError> {
    let orders = state.repository.find_all().await?;
    tracing::debug!(count = orders.len(), "Listing orders");
    Ok(Json(orders))
}

/// Fetch the order assigned to a truck
pub async fn get_order(
    State(state): State<AppState>,
    Path(truck): Path<String>,
) -> Result<Json<TransportationOrder>, ApiError> {
    let order = state
        .repository
        .find_by_id(&truck)
        .await?
        .ok_or_else(|| Error::not_found(&truck))?;

    Ok(Json(order))
}

/// Create an order for a truck that has none yet
pub async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<TransportationOrder>,
) -> Result<Response, ApiError> {
    order.validate()?;

    let location = HeaderValue::try_from(format!("/transportationorders/{}", order.truck))
        .map_err(|e| Error::invalid_request(format!("'truck' is not usable in a URI: {}", e)))?;

    if !state.repository.insert_if_absent(order.clone()).await? {
        return Err(Error::conflict(&order.truck).into());
    }
    tracing::info!(truck = %order.truck, toid = %order.toid, "Created order");

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(order)).into_response())
}

/// Replace the order of a truck that already has one
pub async fn update_order(
    State(state): State<AppState>,
    Json(order): Json<TransportationOrder>,
) -> Result<Json<TransportationOrder>, ApiError> {
    order.validate()?;

    if state.repository.find_by_id(&order.truck).await?.is_none() {
        return Err(Error::not_found(&order.truck).into());
    }

    state.repository.save(order.clone()).await?;
    tracing::info!(truck = %order.truck, toid = %order.toid, "Updated order");

    Ok(Json(order))
}

/// Remove the order of a truck
pub async fn delete_order(
    State(state): State<AppState>,
    Path(truck): Path<String>,
) -> Result<Json<TransportationOrder>, ApiError> {
    let removed = state
        .repository
        .delete_by_id(&truck)
        .await?
        .ok_or_else(|| Error::not_found(&truck))?;

    tracing::info!(%truck, toid = %removed.toid, "Deleted order");
    Ok(Json(removed))
}
