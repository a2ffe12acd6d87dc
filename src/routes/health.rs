use std::collections::HashMap;
use std::env;

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    health.services.insert(
        "session".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(if data.auth.is_signed_in() {
                "signed in".to_string()
            } else {
                "signed out".to_string()
            }),
        },
    );

    health.services.insert(
        "booking_forms".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("{} open", data.forms.len())),
        },
    );

    HttpResponse::Ok().json(health)
}
