use actix_cors::Cors;
use actix_web::{http::Method, web};

use crate::config::CorsConfig;
use crate::middleware::configure_extractors;
use crate::modules::{cart, health};

/// Register extractor settings and every route of the service.
///
/// Callers provide `web::Data<Arc<CartService>>` (and a `MySqlPool` for
/// `/ready`) as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);
    health::controllers::configure(cfg);
    cart::controllers::configure(cfg);
}

/// CORS policy; no configured origins means any origin is accepted
pub fn cors(config: &CorsConfig) -> Cors {
    if config.is_permissive() {
        return Cors::permissive();
    }

    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_any_header()
        .max_age(3600)
}
