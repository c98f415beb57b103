use actix_web::{HttpResponse, web};
use log::debug;

use crate::AppData;
use crate::models::NewSensorRecord;

use super::errors::{ServiceError, ServiceResult};

pub async fn list_records(ctx: web::Data<AppData>) -> ServiceResult<HttpResponse> {
    if !ctx.allow_dumps {
        return Err(ServiceError::PermissionDenied("Dumping is not allowed.".to_string()));
    }

    let store = ctx.store.clone();
    let records = web::block(move || store.list_all()).await?;

    Ok(HttpResponse::Ok().json(records))
}

pub async fn create_record(ctx: web::Data<AppData>, data: web::Json<NewSensorRecord>) -> ServiceResult<HttpResponse> {
    let data = data.into_inner();
    // Reject before reaching for a pooled connection
    data.validate()?;

    let store = ctx.store.clone();
    let record = web::block(move || store.insert(data)).await?;
    debug!("Stored record at {}", record.recorded_at);

    Ok(HttpResponse::Ok().json(record))
}

pub async fn latest_record(ctx: web::Data<AppData>) -> ServiceResult<HttpResponse> {
    let store = ctx.store.clone();
    let record = web::block(move || store.latest()).await?
        .ok_or_else(|| ServiceError::NotFound("Record".to_string()))?;

    Ok(HttpResponse::Ok().json(record))
}
