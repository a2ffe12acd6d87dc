use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::models::{
    booking_detail::BookingDetailSection, bookings::AvailabilityResponse, traveler::TravelerData,
};
use crate::navigation::{Navigator, Route, RouteView};
use crate::services::{form_schedule_service::SubmitOutcome, pricing_service::PriceSummary};
use crate::state::{AppState, FormSession};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFormInput {
    activity_id: String,
    package_id: String,
    date: NaiveDate,
}

#[derive(Deserialize)]
pub struct DateInput {
    date: NaiveDate,
}

/// Raw text as typed; validation happens at submit.
#[derive(Deserialize)]
pub struct ParticipantsInput {
    participants: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    id: String,
    activity_id: String,
    package_id: String,
    date: NaiveDate,
    sections: Vec<BookingDetailSection>,
    price_summary: Option<PriceSummary>,
    availability: Option<AvailabilityResponse>,
    availability_warning: Option<String>,
    route: Option<RouteView>,
    route_history: Vec<RouteView>,
}

#[derive(Serialize)]
struct SubmitView {
    #[serde(flatten)]
    outcome: SubmitOutcome,
    route: Option<RouteView>,
}

#[derive(Serialize)]
struct ClosedView {
    route: RouteView,
}

async fn render(id: &str, session: &FormSession) -> FormView {
    let form = session.form.lock().await;
    FormView {
        id: id.to_string(),
        activity_id: form.activity().id.clone(),
        package_id: form.package().id.clone(),
        date: form.date(),
        sections: form.sections(),
        price_summary: form.price_summary(),
        availability: form.availability().cloned(),
        availability_warning: form.availability_warning(),
        route: session.navigator.current().map(RouteView::from),
        route_history: session
            .navigator
            .history()
            .into_iter()
            .map(RouteView::from)
            .collect(),
    }
}

/*
    POST /api/booking-forms
*/
pub async fn open(
    data: web::Data<AppState>,
    input: web::Json<OpenFormInput>,
) -> Result<HttpResponse, BookingError> {
    let form = data
        .coordinator
        .open(&input.activity_id, &input.package_id, input.date)
        .await?;
    let id = data.forms.insert(form)?.to_string();
    let session = data.forms.get(&id)?;
    session.navigator.navigate(Route::BookingForm {
        form_id: id.clone(),
    });

    Ok(HttpResponse::Created().json(render(&id, &session).await))
}

/*
    GET /api/booking-forms/{id}
*/
pub async fn get_by_id(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, BookingError> {
    let id = path.into_inner();
    let session = data.forms.get(&id)?;
    Ok(HttpResponse::Ok().json(render(&id, &session).await))
}

/*
    DELETE /api/booking-forms/{id}
    Answers with the activity screen to return to.
*/
pub async fn close(path: web::Path<String>, data: web::Data<AppState>) -> HttpResponse {
    match data.forms.remove(&path.into_inner()) {
        Some(session) => {
            let activity_id = session.form.lock().await.activity().id.clone();
            HttpResponse::Ok().json(ClosedView {
                route: Route::ActivityDetail { activity_id }.into(),
            })
        }
        None => HttpResponse::NotFound().body("Booking form not found"),
    }
}

/*
    PUT /api/booking-forms/{id}/date
*/
pub async fn update_date(
    path: web::Path<String>,
    data: web::Data<AppState>,
    input: web::Json<DateInput>,
) -> Result<HttpResponse, BookingError> {
    let id = path.into_inner();
    let session = data.forms.get(&id)?;
    data.coordinator.change_date(&session.form, input.date).await;
    Ok(HttpResponse::Ok().json(render(&id, &session).await))
}

/*
    PUT /api/booking-forms/{id}/participants
*/
pub async fn update_participants(
    path: web::Path<String>,
    data: web::Data<AppState>,
    input: web::Json<ParticipantsInput>,
) -> Result<HttpResponse, BookingError> {
    let id = path.into_inner();
    let session = data.forms.get(&id)?;
    session
        .form
        .lock()
        .await
        .set_participants(input.into_inner().participants);
    Ok(HttpResponse::Ok().json(render(&id, &session).await))
}

/*
    PUT /api/booking-forms/{id}/traveler
*/
pub async fn update_traveler(
    path: web::Path<String>,
    data: web::Data<AppState>,
    input: web::Json<TravelerData>,
) -> Result<HttpResponse, BookingError> {
    let id = path.into_inner();
    let session = data.forms.get(&id)?;
    session.form.lock().await.set_traveler(input.into_inner());
    Ok(HttpResponse::Ok().json(render(&id, &session).await))
}

/*
    POST /api/booking-forms/{id}/submit
*/
pub async fn submit(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, BookingError> {
    let session = data.forms.get(&path.into_inner())?;
    let outcome = data
        .coordinator
        .submit(&session.form, &session.navigator)
        .await;

    let mut response = match &outcome {
        SubmitOutcome::LoginRequired => HttpResponse::Unauthorized(),
        SubmitOutcome::Invalid { .. } => HttpResponse::UnprocessableEntity(),
        SubmitOutcome::Failed { .. } => HttpResponse::BadGateway(),
        SubmitOutcome::Booked { .. } => HttpResponse::Created(),
    };
    Ok(response.json(SubmitView {
        outcome,
        route: session.navigator.current().map(RouteView::from),
    }))
}
