use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Remaining bookable slots for a package on a date.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub id: String,
    pub package_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub available_slots: u32,
}

impl AvailabilityResponse {
    /// Stand-in used when the availability check fails, so the form always has a value.
    pub fn unavailable(package_id: &str, date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            package_id: package_id.to_string(),
            date,
            start_time: String::new(),
            end_time: String::new(),
            available_slots: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub package_id: String,
    pub booking_date: NaiveDate,
    pub participants: u32,
    pub user_id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(default)]
    pub message: String,
    pub success: bool,
    #[serde(default)]
    pub booking_details: Option<BookingDetails>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub booking_id: i64,
    pub status: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub destination: String,
    pub total_price: f64,
    #[serde(default)]
    pub package_name: String,
    pub participants: u32,
    pub activity_date: String,
    #[serde(default)]
    pub activity_title: String,
    #[serde(default)]
    pub booking_created_at: String,
    #[serde(default)]
    pub address: String,
}
