//! Booking form state and submission.
//!
//! [`FormSchedule`] is plain state plus the validation gates; it never does I/O.
//! [`BookingFormCoordinator`] drives it against the backend: availability refreshes are
//! sequenced so a late response can never overwrite a newer one, and submission runs the
//! gates before the single booking call.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{error, info, warn};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{BackendError, BookingError};
use crate::models::{
    activity::{ActivityDetailDataModel, Package},
    booking_detail::{
        BookingDetailSection, FormInputItem, TravelerField, TravelerFieldItem,
    },
    bookings::{AvailabilityResponse, BookingRequest, BookingResponse},
    traveler::TravelerData,
};
use crate::navigation::{Navigator, Route};
use crate::services::{
    backend_client::ActivityBackend,
    booking_detail_transformer::BookingDetailTransformer,
    pricing_service::{PriceSummary, PricingService},
};
use crate::store::auth_session::AuthSession;

pub const MSG_PARTICIPANTS_REQUIRED: &str = "Please enter the number of participants";
pub const MSG_PARTICIPANTS_NOT_NUMBER: &str = "Participants must be a positive whole number";
pub const MSG_LIMITS_UNAVAILABLE: &str = "Package limits unavailable";
pub const MSG_TRAVELER_NAME_REQUIRED: &str = "Please enter the traveler name";
pub const MSG_TRAVELER_INCOMPLETE: &str =
    "Please complete valid traveler details (name, phone and email)";
pub const MSG_BOOKING_FAILED: &str = "We couldn't complete your booking. Please try again.";

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// No stored user id; nothing was sent.
    LoginRequired,
    /// First failing validation gate.
    Invalid { message: String },
    /// The backend refused or could not be reached.
    Failed { message: String },
    Booked { booking: BookingResponse },
}

/// Identifies one availability request. Only the newest ticket may update the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityTicket {
    token: u64,
    pub package_id: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct FormSchedule {
    activity: ActivityDetailDataModel,
    package: Package,
    date: NaiveDate,
    participants: String,
    traveler: TravelerData,
    availability: Option<AvailabilityResponse>,
    availability_token: u64,
}

impl FormSchedule {
    pub fn new(
        activity: ActivityDetailDataModel,
        package_id: &str,
        date: NaiveDate,
    ) -> Result<Self, BookingError> {
        let package = activity
            .find_package(package_id)
            .cloned()
            .ok_or_else(|| BookingError::PackageNotFound(package_id.to_string()))?;

        let participants = package
            .min_participants
            .map(|min| min.max(1).to_string())
            .unwrap_or_default();

        Ok(Self {
            activity,
            package,
            date,
            participants,
            traveler: TravelerData::default(),
            availability: None,
            availability_token: 0,
        })
    }

    pub fn activity(&self) -> &ActivityDetailDataModel {
        &self.activity
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn participants_input(&self) -> &str {
        &self.participants
    }

    pub fn traveler(&self) -> &TravelerData {
        &self.traveler
    }

    pub fn availability(&self) -> Option<&AvailabilityResponse> {
        self.availability.as_ref()
    }

    /// Returns whether the date actually changed. A change drops the previous availability
    /// and invalidates any check still in flight.
    pub fn set_date(&mut self, date: NaiveDate) -> bool {
        if self.date == date {
            return false;
        }
        self.date = date;
        self.availability = None;
        self.availability_token += 1;
        true
    }

    pub fn set_participants(&mut self, raw: impl Into<String>) {
        self.participants = raw.into();
    }

    pub fn set_traveler(&mut self, traveler: TravelerData) {
        self.traveler = traveler;
    }

    pub fn begin_availability_check(&mut self) -> AvailabilityTicket {
        self.availability_token += 1;
        AvailabilityTicket {
            token: self.availability_token,
            package_id: self.package.id.clone(),
            date: self.date,
        }
    }

    /// Store the result of a check. Stale tickets are ignored and return `false`.
    /// A failed check is recorded as zero slots so the form always has a value to show.
    pub fn apply_availability(
        &mut self,
        ticket: AvailabilityTicket,
        result: Result<AvailabilityResponse, BackendError>,
    ) -> bool {
        if ticket.token != self.availability_token
            || ticket.date != self.date
            || ticket.package_id != self.package.id
        {
            info!(
                "Discarding stale availability for {} on {} (request {} superseded by {})",
                ticket.package_id, ticket.date, ticket.token, self.availability_token
            );
            return false;
        }

        let availability = match result {
            Ok(availability) => availability,
            Err(e) => {
                warn!(
                    "Availability check for {} on {} failed, showing zero slots: {}",
                    ticket.package_id, ticket.date, e
                );
                AvailabilityResponse::unavailable(&ticket.package_id, ticket.date)
            }
        };
        self.availability = Some(availability);
        true
    }

    pub fn participant_count(&self) -> Option<u32> {
        self.participants
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|count| *count > 0)
    }

    pub fn validate_participants(&self) -> Result<u32, String> {
        if self.participants.trim().is_empty() {
            return Err(MSG_PARTICIPANTS_REQUIRED.to_string());
        }
        let count = self
            .participant_count()
            .ok_or_else(|| MSG_PARTICIPANTS_NOT_NUMBER.to_string())?;

        let (min, max) = (self.package.min_participants, self.package.max_participants);
        if min.is_none() && max.is_none() {
            return Err(MSG_LIMITS_UNAVAILABLE.to_string());
        }
        if let Some(min) = min {
            if count < min {
                return Err(format!("Minimum {} participants for this package", min));
            }
        }
        if let Some(max) = max {
            if count > max {
                return Err(format!("Maximum {} participants for this package", max));
            }
        }
        Ok(count)
    }

    pub fn validate_traveler(&self) -> Result<(), String> {
        if !self.traveler.has_name() {
            return Err(MSG_TRAVELER_NAME_REQUIRED.to_string());
        }
        if !self.traveler.is_valid() {
            return Err(MSG_TRAVELER_INCOMPLETE.to_string());
        }
        Ok(())
    }

    /// Run the submit gates in order: login, participants, traveler.
    /// Availability is advisory and never blocks.
    pub fn validate(&self, user_id: Option<&str>) -> Result<BookingRequest, SubmitOutcome> {
        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            return Err(SubmitOutcome::LoginRequired);
        };
        let participants = self
            .validate_participants()
            .map_err(|message| SubmitOutcome::Invalid { message })?;
        self.validate_traveler()
            .map_err(|message| SubmitOutcome::Invalid { message })?;

        Ok(BookingRequest {
            package_id: self.package.id.clone(),
            booking_date: self.date,
            participants,
            user_id: user_id.to_string(),
        })
    }

    pub fn price_summary(&self) -> Option<PriceSummary> {
        self.participant_count()
            .map(|count| PricingService::summarize(self.package.price_per_person, count))
    }

    pub fn availability_warning(&self) -> Option<String> {
        let availability = self.availability.as_ref()?;
        if availability.available_slots == 0 {
            return Some(format!(
                "No slots available on {}. You can still send the request for the host to confirm.",
                self.date.format("%d %b %Y")
            ));
        }
        match self.participant_count() {
            Some(count) if count > availability.available_slots => Some(format!(
                "Only {} slots left on {}",
                availability.available_slots,
                self.date.format("%d %b %Y")
            )),
            _ => None,
        }
    }

    /// Every section the form shows, rebuilt from current state.
    pub fn sections(&self) -> Vec<BookingDetailSection> {
        let mut sections = BookingDetailTransformer::transform(&self.activity, &self.package.id);
        sections.push(BookingDetailSection::form_inputs(vec![
            FormInputItem::Date { value: self.date },
            FormInputItem::Participants {
                value: self.participants.clone(),
                min: self.package.min_participants,
                max: self.package.max_participants,
            },
            FormInputItem::Availability {
                available_slots: self.availability.as_ref().map(|a| a.available_slots),
                warning: self.availability_warning(),
            },
            FormInputItem::PriceSummary {
                summary: self.price_summary(),
            },
        ]));
        sections.push(BookingDetailSection::traveler_details(vec![
            TravelerFieldItem {
                field: TravelerField::Name,
                value: self.traveler.name.clone(),
                valid: self.traveler.has_name(),
            },
            TravelerFieldItem {
                field: TravelerField::Phone,
                value: self.traveler.phone.clone(),
                valid: self.traveler.has_valid_phone(),
            },
            TravelerFieldItem {
                field: TravelerField::Email,
                value: self.traveler.email.clone(),
                valid: self.traveler.has_valid_email(),
            },
        ]));
        sections
    }
}

/// Runs the booking form against the backend.
#[derive(Clone)]
pub struct BookingFormCoordinator {
    backend: Arc<dyn ActivityBackend>,
    auth: AuthSession,
}

impl BookingFormCoordinator {
    pub fn new(backend: Arc<dyn ActivityBackend>, auth: AuthSession) -> Self {
        Self { backend, auth }
    }

    /// Load the activity, build the form and run the first availability check.
    pub async fn open(
        &self,
        activity_id: &str,
        package_id: &str,
        date: NaiveDate,
    ) -> Result<Arc<Mutex<FormSchedule>>, BookingError> {
        let activity = self.backend.fetch_activity_detail(activity_id).await?;
        let form = Arc::new(Mutex::new(FormSchedule::new(activity, package_id, date)?));
        self.refresh_availability(&form).await;
        Ok(form)
    }

    /// The lock is not held across the backend call. Returns whether this
    /// response was the newest and got applied.
    pub async fn refresh_availability(&self, form: &Mutex<FormSchedule>) -> bool {
        let ticket = form.lock().await.begin_availability_check();
        self.run_availability_check(form, ticket).await
    }

    /// The date change and the new ticket happen under one lock.
    pub async fn change_date(&self, form: &Mutex<FormSchedule>, date: NaiveDate) -> bool {
        let ticket = {
            let mut form = form.lock().await;
            form.set_date(date);
            form.begin_availability_check()
        };
        self.run_availability_check(form, ticket).await
    }

    async fn run_availability_check(
        &self,
        form: &Mutex<FormSchedule>,
        ticket: AvailabilityTicket,
    ) -> bool {
        let result = self
            .backend
            .check_availability(&ticket.package_id, ticket.date)
            .await;
        form.lock().await.apply_availability(ticket, result)
    }

    pub async fn submit(
        &self,
        form: &Mutex<FormSchedule>,
        navigator: &dyn Navigator,
    ) -> SubmitOutcome {
        let request = {
            let form = form.lock().await;
            match form.validate(self.auth.user_id().as_deref()) {
                Ok(request) => {
                    if let Some(warning) = form.availability_warning() {
                        info!("Submitting despite availability warning: {}", warning);
                    }
                    request
                }
                Err(SubmitOutcome::LoginRequired) => {
                    navigator.navigate(Route::Login);
                    return SubmitOutcome::LoginRequired;
                }
                Err(outcome) => return outcome,
            }
        };

        match self.backend.create_booking(&request).await {
            Ok(response) if response.success => {
                match &response.booking_details {
                    Some(details) => navigator.navigate(Route::BookingConfirmation {
                        booking_id: details.booking_id,
                    }),
                    None => navigator.navigate(Route::Trips),
                }
                info!(
                    "Booked package {} for {} participants on {}",
                    request.package_id, request.participants, request.booking_date
                );
                SubmitOutcome::Booked { booking: response }
            }
            Ok(response) => {
                warn!("Booking rejected by backend: {}", response.message);
                let message = if response.message.is_empty() {
                    MSG_BOOKING_FAILED.to_string()
                } else {
                    response.message
                };
                SubmitOutcome::Failed { message }
            }
            Err(e) => {
                error!("Booking for package {} failed: {}", request.package_id, e);
                SubmitOutcome::Failed {
                    message: MSG_BOOKING_FAILED.to_string(),
                }
            }
        }
    }
}
