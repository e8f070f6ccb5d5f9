pub mod cart;
pub mod catalog;
pub mod orders;
pub mod readiness;
pub mod todos;

use actix_web::web;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        catalog::list_catalog,
        catalog::list_shops,
        cart::get_cart,
        cart::add_item,
        cart::increase_item,
        cart::decrease_item,
        cart::remove_item,
        cart::clear_cart,
        cart::checkout,
        cart::checkout_status,
        orders::list_orders,
        orders::delete_order,
        orders::clear_orders,
        readiness::get_readiness,
        readiness::recheck_readiness,
        todos::get_board,
        todos::create_todo,
        todos::update_todo,
    ),
    components(schemas(
        catalog::CatalogEntryResponse,
        catalog::ShopResponse,
        cart::AddCartItemRequest,
        cart::CartLineResponse,
        cart::CartResponse,
        cart::CheckoutResponse,
        cart::CheckoutStatusResponse,
        orders::OrderLineResponse,
        orders::OrderHistoryResponse,
        readiness::ReadinessResponse,
        todos::CreateTodoRequest,
        todos::UpdateTodoRequest,
        todos::TodoResponse,
        todos::TodoBoardResponse,
    ))
)]
pub struct ApiDoc;

/// Registers every route. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/catalog").route("", web::get().to(catalog::list_catalog)))
        .route("/shops", web::get().to(catalog::list_shops))
        .service(
            web::scope("/cart")
                .route("", web::get().to(cart::get_cart))
                .route("", web::delete().to(cart::clear_cart))
                .route("/items", web::post().to(cart::add_item))
                .route("/items/{id}", web::delete().to(cart::remove_item))
                .route("/items/{id}/increase", web::post().to(cart::increase_item))
                .route("/items/{id}/decrease", web::post().to(cart::decrease_item)),
        )
        .service(
            web::resource("/checkout")
                .route(web::get().to(cart::checkout_status))
                .route(web::post().to(cart::checkout)),
        )
        .service(
            web::scope("/orders")
                .route("", web::get().to(orders::list_orders))
                .route("", web::delete().to(orders::clear_orders))
                .route("/{id}", web::delete().to(orders::delete_order)),
        )
        .service(
            web::scope("/readiness")
                .route("", web::get().to(readiness::get_readiness))
                .route("", web::post().to(readiness::recheck_readiness)),
        )
        .service(
            web::scope("/todos")
                .route("", web::get().to(todos::get_board))
                .route("", web::post().to(todos::create_todo))
                .route("/{id}", web::patch().to(todos::update_todo)),
        );
}
