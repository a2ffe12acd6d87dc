use actix_web::{web, HttpResponse};

use crate::error::BookingError;
use crate::services::{
    booking_detail_transformer::schedule_window, itinerary_generation_service::ItineraryGenerator,
};
use crate::state::AppState;

/*
    /api/activities/{id}/packages/{package_id}/itinerary
*/
pub async fn get_for_package(
    path: web::Path<(String, String)>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, BookingError> {
    let (activity_id, package_id) = path.into_inner();
    let activity = data.backend.fetch_activity_detail(&activity_id).await?;
    let package = activity
        .find_package(&package_id)
        .ok_or_else(|| BookingError::PackageNotFound(package_id.clone()))?;

    let (start, end) = schedule_window(package, activity.duration_minutes);
    let items = ItineraryGenerator::generate(
        &activity.title,
        &package.name,
        &start,
        &end,
        &activity.location,
    );

    Ok(HttpResponse::Ok().json(items))
}
