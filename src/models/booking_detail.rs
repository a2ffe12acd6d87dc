use chrono::NaiveDate;
use serde::Serialize;

use super::itinerary::ItineraryDisplayItem;
use crate::services::pricing_service::PriceSummary;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PackageInfoItem {
    pub label: String,
    pub value: String,
}

impl PackageInfoItem {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ProviderItem {
    Host {
        name: String,
        bio: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
    Operator {
        name: String,
        description: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "input", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum FormInputItem {
    Date {
        value: NaiveDate,
    },
    Participants {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
    Availability {
        #[serde(skip_serializing_if = "Option::is_none")]
        available_slots: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
    },
    PriceSummary {
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<PriceSummary>,
    },
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TravelerField {
    Name,
    Phone,
    Email,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TravelerFieldItem {
    pub field: TravelerField,
    pub value: String,
    pub valid: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum SectionContent {
    PackageInfo(Vec<PackageInfoItem>),
    TripProvider(Vec<ProviderItem>),
    Itinerary(Vec<ItineraryDisplayItem>),
    FormInputs(Vec<FormInputItem>),
    TravelerDetails(Vec<TravelerFieldItem>),
}

/// One display section of the booking detail screen. Rebuilt from state, never edited in place.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BookingDetailSection {
    pub collapsible: bool,
    pub expanded: bool,
    #[serde(flatten)]
    pub content: SectionContent,
}

impl BookingDetailSection {
    pub fn package_info(items: Vec<PackageInfoItem>) -> Self {
        Self::fixed(SectionContent::PackageInfo(items))
    }

    pub fn trip_provider(items: Vec<ProviderItem>) -> Self {
        Self::collapsed(SectionContent::TripProvider(items))
    }

    pub fn itinerary(items: Vec<ItineraryDisplayItem>) -> Self {
        Self::collapsed(SectionContent::Itinerary(items))
    }

    pub fn form_inputs(items: Vec<FormInputItem>) -> Self {
        Self::fixed(SectionContent::FormInputs(items))
    }

    pub fn traveler_details(items: Vec<TravelerFieldItem>) -> Self {
        Self::fixed(SectionContent::TravelerDetails(items))
    }

    fn fixed(content: SectionContent) -> Self {
        Self {
            collapsible: false,
            expanded: true,
            content,
        }
    }

    fn collapsed(content: SectionContent) -> Self {
        Self {
            collapsible: true,
            expanded: false,
            content,
        }
    }
}
