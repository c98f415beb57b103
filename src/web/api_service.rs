use actix_web::{HttpRequest, web, error::JsonPayloadError};

use super::errors::ServiceError;
use super::records_service::{create_record, latest_record, list_records};

// limit the maximum amount of data that server will accept
pub const JSON_LIMIT: usize = 4096;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ServiceError::ValidationError(err.to_string()).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT).error_handler(json_error))
            .route(web::get().to(list_records))
            .route(web::post().to(create_record))
    )
        .service(web::resource("/latest").route(web::get().to(latest_record)));
}
