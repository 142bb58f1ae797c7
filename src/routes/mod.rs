use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod api;

/// Maps a service failure onto the HTTP response returned to API clients.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::InvalidRequest(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::Repository(_) | ServiceError::Export(_) => {
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}

/// Query extractor settings: descriptors that fail to decode get the same
/// JSON 400 body as descriptors that fail validation.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = service_error_response(&ServiceError::InvalidRequest(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Mounts the `/api` customer routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config()).service(
        web::scope("/api")
            .service(api::list_customers)
            .service(api::export_customers),
    );
}
