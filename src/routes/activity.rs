use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Deserialize;

use crate::error::{BackendError, BookingError};
use crate::services::booking_detail_transformer::BookingDetailTransformer;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct QueryParams {
    search: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailParams {
    package_id: String,
}

/*
    /api/activities?search=
*/
pub async fn get_activities(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let search = params.search.as_deref().unwrap_or("").trim();
    match data.backend.search_activities(search).await {
        Ok(activities) => HttpResponse::Ok().json(activities),
        Err(err) => {
            error!("Failed to search activities: {}", err);
            HttpResponse::BadGateway().body("Failed to search activities.")
        }
    }
}

/*
    /api/activities/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<AppState>) -> impl Responder {
    let activity_id = path.into_inner();
    match data.backend.fetch_activity_detail(&activity_id).await {
        Ok(activity) => HttpResponse::Ok().json(activity),
        Err(BackendError::Status { status: 404, .. }) => {
            HttpResponse::NotFound().body("Activity not found")
        }
        Err(err) => {
            error!("Failed to fetch activity {}: {}", activity_id, err);
            HttpResponse::BadGateway().body("Failed to fetch activity.")
        }
    }
}

/*
    /api/activities/{id}/booking-detail?package_id=
*/
pub async fn get_booking_detail(
    path: web::Path<String>,
    params: web::Query<BookingDetailParams>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, BookingError> {
    let activity = data.backend.fetch_activity_detail(&path.into_inner()).await?;
    let sections = BookingDetailTransformer::transform(&activity, &params.package_id);
    if sections.is_empty() {
        return Err(BookingError::PackageNotFound(params.package_id.clone()));
    }
    Ok(HttpResponse::Ok().json(sections))
}
