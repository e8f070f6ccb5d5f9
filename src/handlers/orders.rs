use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::cart::format_money;
use crate::domain::order::{OrderHistoryView, OrderLine};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: String,
    pub name: String,
    pub image_ref: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<&OrderLine> for OrderLineResponse {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            image_ref: line.image_ref.clone(),
            price: format_money(&line.price),
            quantity: line.quantity,
            subtotal: format_money(&line.subtotal()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderHistoryResponse {
    pub lines: Vec<OrderLineResponse>,
    pub total_items: u32,
    pub total_value: String,
}

impl From<OrderHistoryView> for OrderHistoryResponse {
    fn from(view: OrderHistoryView) -> Self {
        Self {
            lines: view.lines.iter().map(OrderLineResponse::from).collect(),
            total_items: view.total_items,
            total_value: format_money(&view.total_value),
        }
    }
}

/// GET /orders
///
/// Returns every committed order line, sorted by name.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Order history", body = OrderHistoryResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = web::block(move || state.orders.history())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderHistoryResponse::from(view)))
}

/// DELETE /orders/{id}
///
/// Deleting an id that is not stored still succeeds.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order line id (the catalog item id)")),
    responses(
        (status = 204, description = "Order line deleted"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.orders.delete_line(&id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    delete,
    path = "/orders",
    responses(
        (status = 204, description = "All order lines deleted"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn clear_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    web::block(move || state.orders.delete_all())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
