//! REST collaborators of the booking flow.
//!
//! [`ActivityBackend`] is the seam the form orchestration depends on; [`ReqwestActivityBackend`]
//! talks to the real backend. Errors are logged here before being handed back, callers decide
//! what to substitute.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::BackendError;
use crate::models::{
    activity::{Activity, ActivityDetailDataModel},
    bookings::{AvailabilityResponse, BookingDetails, BookingRequest, BookingResponse},
};

#[async_trait]
pub trait ActivityBackend: Send + Sync {
    async fn search_activities(&self, search_text: &str) -> Result<Vec<Activity>, BackendError>;

    async fn fetch_activity_detail(
        &self,
        activity_id: &str,
    ) -> Result<ActivityDetailDataModel, BackendError>;

    async fn check_availability(
        &self,
        package_id: &str,
        date: NaiveDate,
    ) -> Result<AvailabilityResponse, BackendError>;

    async fn create_booking(&self, request: &BookingRequest)
        -> Result<BookingResponse, BackendError>;

    async fn list_bookings(&self, user_id: &str) -> Result<Vec<BookingDetails>, BackendError>;
}

#[derive(Clone, Debug)]
pub struct ReqwestActivityBackend {
    base_url: Url,
    http_client: reqwest::Client,
}

impl ReqwestActivityBackend {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        // Trailing slash so joined paths stay under the base path
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, BackendError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} failed with status {}: {}", what, status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response.json::<T>().await.map_err(|e| {
            error!("{} returned an unreadable body: {}", what, e);
            BackendError::Http(e)
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, BackendError> {
        debug!("GET {}", url);
        let response = self.http_client.get(url).send().await.map_err(|e| {
            error!("{} request failed: {}", what, e);
            BackendError::Http(e)
        })?;
        Self::read_json(response, what).await
    }
}

#[async_trait]
impl ActivityBackend for ReqwestActivityBackend {
    async fn search_activities(&self, search_text: &str) -> Result<Vec<Activity>, BackendError> {
        let url = self.endpoint("activities", &[("searchText", search_text)])?;
        self.get_json(url, "Activity search").await
    }

    async fn fetch_activity_detail(
        &self,
        activity_id: &str,
    ) -> Result<ActivityDetailDataModel, BackendError> {
        let mut url = self.endpoint("activities", &[])?;
        url.path_segments_mut()
            .map_err(|_| BackendError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(activity_id);

        let activity: ActivityDetailDataModel = self.get_json(url, "Activity detail").await?;
        activity.check_unique_package_ids().map_err(|e| {
            error!("Activity {} rejected: {}", activity_id, e);
            BackendError::InvalidData(e.to_string())
        })?;
        Ok(activity)
    }

    async fn check_availability(
        &self,
        package_id: &str,
        date: NaiveDate,
    ) -> Result<AvailabilityResponse, BackendError> {
        let date = date.format("%Y-%m-%d").to_string();
        let url = self.endpoint("availability", &[("packageId", package_id), ("date", &date)])?;
        self.get_json(url, "Availability check").await
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingResponse, BackendError> {
        let url = self.endpoint("bookings", &[])?;
        debug!("POST {}", url);
        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Booking request failed: {}", e);
                BackendError::Http(e)
            })?;
        Self::read_json(response, "Booking creation").await
    }

    async fn list_bookings(&self, user_id: &str) -> Result<Vec<BookingDetails>, BackendError> {
        let url = self.endpoint("bookings", &[("userId", user_id)])?;
        self.get_json(url, "Booking list").await
    }
}
