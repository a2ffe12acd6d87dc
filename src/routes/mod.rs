use actix_web::web;

use crate::middleware::auth::RequireLogin;

pub mod activity;
pub mod booking_form;
pub mod health;
pub mod itinerary;
pub mod session;
pub mod trips;

/// Every `/api` route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/session")
                        .route(web::get().to(session::current))
                        .route(web::post().to(session::sign_in))
                        .route(web::delete().to(session::sign_out)),
                )
                .service(
                    web::scope("/activities")
                        .route("", web::get().to(activity::get_activities))
                        .route("/{id}", web::get().to(activity::get_by_id))
                        .route(
                            "/{id}/booking-detail",
                            web::get().to(activity::get_booking_detail),
                        )
                        .route(
                            "/{id}/packages/{package_id}/itinerary",
                            web::get().to(itinerary::get_for_package),
                        ),
                )
                .service(
                    web::scope("/booking-forms")
                        .route("", web::post().to(booking_form::open))
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(booking_form::get_by_id))
                                .route(web::delete().to(booking_form::close)),
                        )
                        .route("/{id}/date", web::put().to(booking_form::update_date))
                        .route(
                            "/{id}/participants",
                            web::put().to(booking_form::update_participants),
                        )
                        .route(
                            "/{id}/traveler",
                            web::put().to(booking_form::update_traveler),
                        )
                        .route("/{id}/submit", web::post().to(booking_form::submit)),
                )
                // Protected routes
                .service(
                    web::scope("/trips")
                        .wrap(RequireLogin)
                        .route("", web::get().to(trips::get_trips)),
                ),
        );
}
