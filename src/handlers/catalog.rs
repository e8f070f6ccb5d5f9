use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::cart::format_money;
use crate::domain::catalog::{search, Shop};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogParams {
    /// Case-insensitive name filter. Empty returns everything.
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogEntryResponse {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image_ref: String,
    /// Units of this item currently in the cart.
    pub in_cart: u32,
}

/// GET /catalog
///
/// Fetches the remote catalog on every call. A failed fetch returns an empty
/// list rather than an error.
#[utoipa::path(
    get,
    path = "/catalog",
    params(CatalogParams),
    responses(
        (status = 200, description = "Catalog items", body = [CatalogEntryResponse]),
    ),
    tag = "catalog"
)]
pub async fn list_catalog(
    state: web::Data<AppState>,
    query: web::Query<CatalogParams>,
) -> HttpResponse {
    let items = state.catalog.fetch_items().await;

    let cart = state.cart();
    let entries: Vec<CatalogEntryResponse> = search(&items, &query.q)
        .into_iter()
        .map(|item| CatalogEntryResponse {
            id: item.id.clone(),
            name: item.name.clone(),
            price: format_money(&item.price),
            image_ref: item.image_ref.clone(),
            in_cart: cart.quantity_of(&item.id),
        })
        .collect();

    HttpResponse::Ok().json(entries)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopResponse {
    pub id: String,
    pub name: String,
    pub image_ref: String,
    pub accepting_orders: bool,
}

impl From<Shop> for ShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.id,
            name: shop.name,
            image_ref: shop.image_ref,
            accepting_orders: shop.accepting_orders,
        }
    }
}

/// GET /shops
///
/// Same failure policy as the catalog: an unreachable shop list is empty.
#[utoipa::path(
    get,
    path = "/shops",
    responses(
        (status = 200, description = "Shops", body = [ShopResponse]),
    ),
    tag = "catalog"
)]
pub async fn list_shops(state: web::Data<AppState>) -> HttpResponse {
    let shops: Vec<ShopResponse> = state
        .catalog
        .fetch_shops()
        .await
        .into_iter()
        .map(ShopResponse::from)
        .collect();

    HttpResponse::Ok().json(shops)
}
