use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::customer::CustomerListParams;
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::customers as customer_service;

#[get("/customers/list")]
pub async fn list_customers(
    params: web::Query<CustomerListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match customer_service::list_customers(repo.get_ref(), params.into_inner()) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(err) => service_error_response(&err),
    }
}

#[get("/customers/export")]
pub async fn export_customers(
    params: web::Query<CustomerListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match customer_service::export_customers(repo.get_ref(), params.into_inner()) {
        Ok(file) => HttpResponse::Ok()
            .content_type(file.media_type)
            .insert_header(ContentDisposition::attachment(file.file_name))
            .body(file.bytes),
        Err(err) => service_error_response(&err),
    }
}
