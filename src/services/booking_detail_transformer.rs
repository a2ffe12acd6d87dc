use std::sync::LazyLock;

use chrono::{Duration, NaiveTime};
use regex::Regex;

use crate::models::{
    activity::{ActivityDetailDataModel, Package},
    booking_detail::{BookingDetailSection, PackageInfoItem, ProviderItem},
};
use crate::services::itinerary_generation_service::{parse_time, ItineraryGenerator};

static PAX_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)min\.?\s*(\d+)\s*-\s*max\.?\s*(\d+)").expect("valid pax range regex")
});

/// Start of the day used when a package carries no explicit schedule.
const DEFAULT_START: (u32, u32) = (9, 0);

/// Pull `X - Y pax` out of a `Min.X - Max.Y` package description.
/// Descriptions without that pattern come back unchanged.
pub fn extract_pax_range(description: &str) -> String {
    match PAX_RANGE_RE.captures(description) {
        Some(caps) => format!("{} - {} pax", &caps[1], &caps[2]),
        None => description.to_string(),
    }
}

/// Start and end of a package, as `HH:mm` strings.
///
/// Explicit package times win when both are present (even unparseable ones, which the
/// itinerary generator turns into its fallback). Otherwise the activity duration is laid out
/// from 09:00.
pub fn schedule_window(package: &Package, duration_minutes: u32) -> (String, String) {
    if let (Some(start), Some(end)) = (&package.start_time, &package.end_time) {
        return (start.clone(), end.clone());
    }

    let anchor = package
        .start_time
        .as_deref()
        .and_then(parse_time)
        .or_else(|| NaiveTime::from_hms_opt(DEFAULT_START.0, DEFAULT_START.1, 0))
        .unwrap_or_default();
    let end = anchor + Duration::minutes(duration_minutes as i64);

    (
        anchor.format("%H:%M").to_string(),
        end.format("%H:%M").to_string(),
    )
}

fn display_time(value: &str) -> String {
    parse_time(value)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

pub struct BookingDetailTransformer;

impl BookingDetailTransformer {
    /// Display sections for the selected package: package info, trip provider, itinerary.
    /// An unknown package yields no sections.
    pub fn transform(
        activity: &ActivityDetailDataModel,
        selected_package_id: &str,
    ) -> Vec<BookingDetailSection> {
        let Some(package) = activity.find_package(selected_package_id) else {
            return Vec::new();
        };

        let (start, end) = schedule_window(package, activity.duration_minutes);
        let itinerary = ItineraryGenerator::generate(
            &activity.title,
            &package.name,
            &start,
            &end,
            &activity.location,
        );

        vec![
            BookingDetailSection::package_info(Self::package_info_items(package, &start, &end)),
            BookingDetailSection::trip_provider(Self::provider_items(activity, package)),
            BookingDetailSection::itinerary(itinerary),
        ]
    }

    fn package_info_items(package: &Package, start: &str, end: &str) -> Vec<PackageInfoItem> {
        vec![
            PackageInfoItem::new("Package", package.name.clone()),
            PackageInfoItem::new("Price", package.price.clone()),
            PackageInfoItem::new("Participants", extract_pax_range(&package.description)),
            PackageInfoItem::new(
                "Duration",
                format!("{} - {}", display_time(start), display_time(end)),
            ),
        ]
    }

    fn provider_items(activity: &ActivityDetailDataModel, package: &Package) -> Vec<ProviderItem> {
        let mut items = Vec::with_capacity(2);
        if !package.host_name.is_empty() {
            items.push(ProviderItem::Host {
                name: package.host_name.clone(),
                bio: package.host_bio.clone(),
                image_url: package.host_image_url.clone(),
            });
        }
        let provider = &activity.provider_detail;
        if !provider.name.is_empty() {
            items.push(ProviderItem::Operator {
                name: provider.name.clone(),
                description: provider.description.clone(),
                image_url: provider.image_url.clone(),
            });
        }
        items
    }
}
