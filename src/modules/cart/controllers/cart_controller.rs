use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::cart::models::{
    AddToCartRequest, CartClearedResponse, LineMessageResponse, QuantityUpdatedResponse,
    UpdateQuantityRequest,
};
use crate::modules::cart::services::CartService;

/// Add a product to the cart or increase its quantity
/// POST /carrito
pub async fn add_to_cart(
    service: web::Data<Arc<CartService>>,
    request: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let confirmation = service
        .upsert_line(&request.product_id, request.quantity)
        .await?;

    Ok(HttpResponse::Created().json(LineMessageResponse {
        message: "Producto agregado/actualizado en el carrito".to_string(),
        product_id: confirmation.product_id,
    }))
}

/// List every cart line with product details
/// GET /carrito
pub async fn list_cart(service: web::Data<Arc<CartService>>) -> Result<HttpResponse, AppError> {
    let lines = service.list_lines().await?;

    Ok(HttpResponse::Ok().json(lines))
}

/// Overwrite the quantity of one line
/// PUT /carrito/{product_id}
pub async fn update_quantity(
    service: web::Data<Arc<CartService>>,
    path: web::Path<String>,
    request: web::Json<UpdateQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let update = service
        .set_quantity(&product_id, request.into_inner().quantity)
        .await?;

    Ok(HttpResponse::Ok().json(QuantityUpdatedResponse {
        message: "Cantidad actualizada".to_string(),
        product_id: update.product_id,
        new_quantity: update.quantity,
    }))
}

/// Remove one line
/// DELETE /carrito/{product_id}
pub async fn remove_from_cart(
    service: web::Data<Arc<CartService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let confirmation = service.remove_line(&product_id).await?;

    Ok(HttpResponse::Ok().json(LineMessageResponse {
        message: "Producto eliminado del carrito".to_string(),
        product_id: confirmation.product_id,
    }))
}

/// Remove every line
/// DELETE /carrito
pub async fn clear_cart(service: web::Data<Arc<CartService>>) -> Result<HttpResponse, AppError> {
    service.clear_cart().await?;

    Ok(HttpResponse::Ok().json(CartClearedResponse {
        message: "Carrito vaciado exitosamente".to_string(),
    }))
}

/// Configure cart routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/carrito")
            .route("", web::post().to(add_to_cart))
            .route("", web::get().to(list_cart))
            .route("", web::delete().to(clear_cart))
            .route("/{product_id}", web::put().to(update_quantity))
            .route("/{product_id}", web::delete().to(remove_from_cart)),
    );
}
