use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::{format_money, CartStore, CartSummary};
use crate::domain::catalog::CatalogItem;
use crate::domain::order::CheckoutReceipt;
use crate::errors::AppError;
use crate::state::AppState;

use super::orders::OrderLineResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    pub id: String,
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub image_ref: String,
}

impl TryFrom<AddCartItemRequest> for CatalogItem {
    type Error = AppError;

    fn try_from(req: AddCartItemRequest) -> Result<Self, Self::Error> {
        let price = BigDecimal::from_str(&req.price)
            .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", req.price, e)))?;
        if price < BigDecimal::zero() {
            return Err(AppError::BadRequest(format!("Negative price '{}'", req.price)));
        }
        Ok(CatalogItem {
            id: req.id,
            name: req.name,
            price,
            image_ref: req.image_ref,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub id: String,
    pub name: String,
    pub image_ref: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_items: u32,
    pub subtotal: String,
    pub delivery_fee: String,
    pub tax: String,
    pub total: String,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        let summary = CartSummary::of(cart);
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineResponse {
                    id: line.item.id.clone(),
                    name: line.item.name.clone(),
                    image_ref: line.item.image_ref.clone(),
                    price: format_money(&line.item.price),
                    quantity: line.quantity,
                    subtotal: format_money(&line.subtotal()),
                })
                .collect(),
            total_items: summary.total_items,
            subtotal: format_money(&summary.subtotal),
            delivery_fee: format_money(&summary.delivery_fee),
            tax: format_money(&summary.tax),
            total: format_money(&summary.total),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub id: Uuid,
    pub placed_at: String,
    pub lines: Vec<OrderLineResponse>,
    pub total: String,
}

impl From<CheckoutReceipt> for CheckoutResponse {
    fn from(receipt: CheckoutReceipt) -> Self {
        Self {
            id: receipt.id,
            placed_at: receipt.placed_at.to_rfc3339(),
            lines: receipt.lines.iter().map(OrderLineResponse::from).collect(),
            total: format_money(&receipt.total),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutStatusResponse {
    /// One of `idle`, `in_progress`, `committed`, `failed`.
    pub state: String,
}

fn cart_response(state: &AppState) -> HttpResponse {
    HttpResponse::Ok().json(CartResponse::from(&*state.cart()))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /cart
///
/// Returns the cart lines in the order they were added, with totals.
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Current cart", body = CartResponse),
    ),
    tag = "cart"
)]
pub async fn get_cart(state: web::Data<AppState>) -> HttpResponse {
    cart_response(&state)
}

/// POST /cart/items
///
/// Adds one unit of the item, creating its line on first add.
#[utoipa::path(
    post,
    path = "/cart/items",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid price"),
    ),
    tag = "cart"
)]
pub async fn add_item(
    state: web::Data<AppState>,
    body: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = CatalogItem::try_from(body.into_inner())?;
    state.cart().add_to_cart(item);
    Ok(cart_response(&state))
}

/// POST /cart/items/{id}/increase
#[utoipa::path(
    post,
    path = "/cart/items/{id}/increase",
    params(("id" = String, Path, description = "Catalog item id")),
    responses((status = 200, description = "Updated cart", body = CartResponse)),
    tag = "cart"
)]
pub async fn increase_item(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    state.cart().increase_quantity(&path.into_inner());
    cart_response(&state)
}

/// POST /cart/items/{id}/decrease
///
/// Taking the last unit removes the line.
#[utoipa::path(
    post,
    path = "/cart/items/{id}/decrease",
    params(("id" = String, Path, description = "Catalog item id")),
    responses((status = 200, description = "Updated cart", body = CartResponse)),
    tag = "cart"
)]
pub async fn decrease_item(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    state.cart().decrease_quantity(&path.into_inner());
    cart_response(&state)
}

#[utoipa::path(
    delete,
    path = "/cart/items/{id}",
    params(("id" = String, Path, description = "Catalog item id")),
    responses((status = 200, description = "Updated cart", body = CartResponse)),
    tag = "cart"
)]
pub async fn remove_item(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    state.cart().remove_from_cart(&path.into_inner());
    cart_response(&state)
}

#[utoipa::path(
    delete,
    path = "/cart",
    responses((status = 200, description = "Emptied cart", body = CartResponse)),
    tag = "cart"
)]
pub async fn clear_cart(state: web::Data<AppState>) -> HttpResponse {
    state.cart().clear_cart();
    cart_response(&state)
}

/// POST /checkout
///
/// Writes every cart line to the local order store and empties the cart.
/// On failure the cart is left as it was so the request can be retried.
#[utoipa::path(
    post,
    path = "/checkout",
    responses(
        (status = 201, description = "Order placed", body = CheckoutResponse),
        (status = 400, description = "Cart is empty"),
        (status = 409, description = "A checkout is already in progress"),
        (status = 503, description = "Local store not ready"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn checkout(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let receipt = web::block(move || state.checkout.checkout(&state.cart))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CheckoutResponse::from(receipt)))
}

/// GET /checkout
///
/// Reports the outcome of the last checkout attempt.
#[utoipa::path(
    get,
    path = "/checkout",
    responses((status = 200, description = "Checkout state", body = CheckoutStatusResponse)),
    tag = "cart"
)]
pub async fn checkout_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(CheckoutStatusResponse {
        state: state.checkout.state().as_str().to_string(),
    })
}
