use chrono::{Duration, NaiveTime};
use log::warn;

use crate::models::itinerary::{ActivityCategory, ItineraryDisplayItem};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const LOCATION_PLACEHOLDER: &str = "{location}";

struct SegmentTemplate {
    title: &'static str,
    description: &'static str,
}

const fn segment(title: &'static str, description: &'static str) -> SegmentTemplate {
    SegmentTemplate { title, description }
}

const DIVING: [SegmentTemplate; 6] = [
    segment(
        "Meeting Point & Briefing",
        "Meet your guide in {location} for a safety briefing and gear fitting",
    ),
    segment("Boat Transfer", "Cruise out to the first reef spot off {location}"),
    segment(
        "First Snorkeling Session",
        "Explore the coral gardens around {location}",
    ),
    segment("Lunch Break", "Rest on board with a packed lunch and fresh fruit"),
    segment(
        "Second Snorkeling Session",
        "Drift along a second reef and look out for manta rays",
    ),
    segment("Return Journey", "Head back to shore in {location}"),
];

const HIKING: [SegmentTemplate; 5] = [
    segment(
        "Trailhead Meetup",
        "Gather at the trailhead in {location} and warm up",
    ),
    segment(
        "Ascent",
        "Climb through forest trails with rest stops along the way",
    ),
    segment(
        "Summit Rest",
        "Take in the views over {location} with a light snack",
    ),
    segment("Descent", "Make your way down on the return trail"),
    segment(
        "Back at Base",
        "Cool down and freshen up before heading home",
    ),
];

const CITY_TOUR: [SegmentTemplate; 6] = [
    segment("Hotel Pickup", "Pickup from your accommodation in {location}"),
    segment(
        "First Stop",
        "Visit the first landmark of {location} with your guide",
    ),
    segment("Cultural Visit", "Explore local temples and heritage sites"),
    segment("Lunch", "Enjoy a local lunch"),
    segment("Scenic Stop", "Photo stop at a viewpoint around {location}"),
    segment("Drop-off", "Return transfer to your accommodation"),
];

const CULINARY: [SegmentTemplate; 5] = [
    segment(
        "Market Visit",
        "Shop for fresh ingredients at a traditional market in {location}",
    ),
    segment(
        "Kitchen Introduction",
        "Meet the chef and learn about local spices",
    ),
    segment("Cooking Session", "Prepare traditional dishes step by step"),
    segment("Feast", "Sit down and enjoy the dishes you cooked"),
    segment(
        "Recipe Wrap-up",
        "Take home the recipes and a small souvenir",
    ),
];

const GENERAL: [SegmentTemplate; 4] = [
    segment("Meet & Greet", "Meet your host in {location}"),
    segment("Main Activity", "Enjoy the main experience"),
    segment("Break", "Short break with refreshments"),
    segment("Wrap-up", "Final moments and farewell in {location}"),
];

fn template(category: ActivityCategory) -> &'static [SegmentTemplate] {
    match category {
        ActivityCategory::Diving => &DIVING,
        ActivityCategory::Hiking => &HIKING,
        ActivityCategory::CityTour => &CITY_TOUR,
        ActivityCategory::Culinary => &CULINARY,
        ActivityCategory::General => &GENERAL,
    }
}

/// Parse `HH:mm` or `HH:mm:ss`
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Human label for a segment length, e.g. `45 min`, `1 hr`, `1 hr 20 min`
pub fn format_duration_label(minutes: i64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} hr", h),
        (h, m) => format!("{} hr {} min", h, m),
    }
}

pub struct ItineraryGenerator;

impl ItineraryGenerator {
    /// Build the timed schedule for a package.
    ///
    /// The total window is split evenly across the category's template. Unparseable times give
    /// a two-step fallback built from the raw strings instead of an error.
    pub fn generate(
        activity_title: &str,
        package_name: &str,
        start_time: &str,
        end_time: &str,
        location: &str,
    ) -> Vec<ItineraryDisplayItem> {
        let (start, end) = match (parse_time(start_time), parse_time(end_time)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                warn!(
                    "Unparseable package times ({:?}, {:?}), using fallback itinerary",
                    start_time, end_time
                );
                return Self::fallback(start_time, end_time, location);
            }
        };

        let category = ActivityCategory::classify(activity_title, package_name);
        let segments = template(category);

        // An end before the start runs past midnight; equal times are a zero-length window
        let mut total_seconds = (end - start).num_seconds();
        if total_seconds < 0 {
            total_seconds += SECONDS_PER_DAY;
        }
        let segment_seconds = total_seconds / segments.len() as i64;
        let label = format_duration_label(segment_seconds / 60);

        let mut items: Vec<ItineraryDisplayItem> = segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let time = start + Duration::seconds(segment_seconds * i as i64);
                ItineraryDisplayItem {
                    time: time.format("%H:%M").to_string(),
                    title: segment.title.to_string(),
                    description: segment.description.replace(LOCATION_PLACEHOLDER, location),
                    duration: Some(label.clone()),
                    is_first_item: false,
                    is_last_item: false,
                }
            })
            .collect();

        stamp_positions(&mut items);
        items
    }

    fn fallback(start_time: &str, end_time: &str, location: &str) -> Vec<ItineraryDisplayItem> {
        let mut items = vec![
            ItineraryDisplayItem {
                time: start_time.to_string(),
                title: "Activity Start".to_string(),
                description: format!("Start of your activity in {}", location),
                duration: None,
                is_first_item: false,
                is_last_item: false,
            },
            ItineraryDisplayItem {
                time: end_time.to_string(),
                title: "Activity End".to_string(),
                description: format!("End of your activity in {}", location),
                duration: None,
                is_first_item: false,
                is_last_item: false,
            },
        ];
        stamp_positions(&mut items);
        items
    }
}

fn stamp_positions(items: &mut [ItineraryDisplayItem]) {
    let last = items.len().saturating_sub(1);
    for (i, item) in items.iter_mut().enumerate() {
        item.is_first_item = i == 0;
        item.is_last_item = i == last;
    }
}
