use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::middleware::auth::SignedInUser;
use crate::state::AppState;

/*
    /api/trips (requires a signed-in user)
*/
pub async fn get_trips(data: web::Data<AppState>, user: SignedInUser) -> impl Responder {
    match data.backend.list_bookings(&user.0).await {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(err) => {
            error!("Failed to list bookings for {}: {}", user.0, err);
            HttpResponse::BadGateway().body("Failed to fetch trips.")
        }
    }
}
