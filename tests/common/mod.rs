#![allow(dead_code)]

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use activity_booking_api::{
    config::FORM_IDLE_TIMEOUT,
    routes,
    services::backend_client::ReqwestActivityBackend,
    state::AppState,
    store::{auth_session::AuthSession, preferences::MemoryPreferenceStore},
};

pub struct TestApp {
    pub server: MockServer,
    pub state: web::Data<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let backend = ReqwestActivityBackend::new(&server.uri(), None)
            .expect("mock server uri should parse");
        let auth = AuthSession::new(Arc::new(MemoryPreferenceStore::new()));
        let state = web::Data::new(AppState::new(Arc::new(backend), auth, FORM_IDLE_TIMEOUT));

        Self { server, state }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }

    pub fn sign_in(&self, user_id: &str) {
        self.state.auth.sign_in(user_id).expect("sign in");
    }

    pub async fn mount_activity(&self) {
        Mock::given(method("GET"))
            .and(path("/activities/act-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(activity_json()))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_availability(&self, date: &str, slots: u32) {
        Mock::given(method("GET"))
            .and(path("/availability"))
            .and(query_param("packageId", "p-dive"))
            .and(query_param("date", date))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": format!("av-{}", date),
                "packageId": "p-dive",
                "date": date,
                "startTime": "08:00",
                "endTime": "16:00",
                "availableSlots": slots
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn booking_requests(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == "POST" && r.url.path() == "/bookings")
            .count()
    }
}

pub fn activity_json() -> serde_json::Value {
    json!({
        "id": "act-1",
        "title": "Amazing Snorkeling Adventure",
        "location": "Nusa Penida",
        "imageUrls": ["https://img.example.com/penida.jpg"],
        "durationMinutes": 480,
        "description": "Snorkel with manta rays",
        "providerDetail": {
            "name": "Penida Trips",
            "description": "Family run operator since 2009"
        },
        "facilities": ["Snorkel gear", "Lunch"],
        "terms": "Free cancellation up to 24 hours before",
        "packagesByHost": {
            "Wayan": [
                {
                    "id": "p-dive",
                    "name": "Full Day Trip",
                    "description": "Min.2 - Max.8 per boat",
                    "price": "Rp500.000",
                    "pricePerPerson": 500000,
                    "minParticipants": 2,
                    "maxParticipants": 8,
                    "hostName": "Wayan",
                    "hostBio": "Dive master",
                    "startTime": "08:00",
                    "endTime": "16:00"
                }
            ],
            "Ayu": [
                {
                    "id": "p-sunset",
                    "name": "Sunset Cruise",
                    "description": "Relaxed evening trip",
                    "price": "Rp350.000",
                    "pricePerPerson": 350000,
                    "hostName": "Ayu",
                    "hostBio": "Boat captain"
                }
            ]
        }
    })
}

pub fn traveler_json() -> serde_json::Value {
    json!({
        "name": "Made Wirawan",
        "phone": "+62 812 3456 7890",
        "email": "made@example.com"
    })
}

pub fn booking_response_json() -> serde_json::Value {
    json!({
        "message": "Booking created",
        "success": true,
        "bookingDetails": {
            "bookingId": 1001,
            "status": "pending",
            "startTime": "08:00",
            "destination": "Nusa Penida",
            "totalPrice": 1500000.0,
            "packageName": "Full Day Trip",
            "participants": 3,
            "activityDate": "2026-11-02",
            "activityTitle": "Amazing Snorkeling Adventure",
            "bookingCreatedAt": "2026-10-19T10:00:00Z",
            "address": "Jl. Ped, Nusa Penida"
        }
    })
}
