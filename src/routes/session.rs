use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInInput {
    user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionInfo {
    signed_in: bool,
    user_id: Option<String>,
}

/*
    GET /api/session
*/
pub async fn current(data: web::Data<AppState>) -> impl Responder {
    let user_id = data.auth.user_id();
    HttpResponse::Ok().json(SessionInfo {
        signed_in: user_id.is_some(),
        user_id,
    })
}

/*
    POST /api/session
*/
pub async fn sign_in(data: web::Data<AppState>, input: web::Json<SignInInput>) -> impl Responder {
    let user_id = input.user_id.trim();
    if user_id.is_empty() {
        return HttpResponse::BadRequest().body("user_id is required");
    }

    match data.auth.sign_in(user_id) {
        Ok(()) => HttpResponse::Ok().json(SessionInfo {
            signed_in: true,
            user_id: Some(user_id.to_string()),
        }),
        Err(err) => {
            error!("Failed to store user id: {}", err);
            HttpResponse::InternalServerError().body("Failed to sign in")
        }
    }
}

/*
    DELETE /api/session
*/
pub async fn sign_out(data: web::Data<AppState>) -> impl Responder {
    match data.auth.sign_out() {
        Ok(()) => HttpResponse::Ok().json(SessionInfo {
            signed_in: false,
            user_id: None,
        }),
        Err(err) => {
            error!("Failed to clear user id: {}", err);
            HttpResponse::InternalServerError().body("Failed to sign out")
        }
    }
}
