use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDisplayItem {
    pub time: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub is_first_item: bool,
    pub is_last_item: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Diving,
    Hiking,
    CityTour,
    Culinary,
    General,
}

impl ActivityCategory {
    /// Keyword table, checked in order. First match wins.
    const KEYWORDS: [(ActivityCategory, &'static [&'static str]); 4] = [
        (ActivityCategory::Diving, &["snorkel", "dive"]),
        (ActivityCategory::Hiking, &["hike", "trekking"]),
        (ActivityCategory::CityTour, &["tour", "combo"]),
        (ActivityCategory::Culinary, &["cooking", "culinary"]),
    ];

    /// Classify an activity from its title and package name.
    pub fn classify(activity_title: &str, package_name: &str) -> Self {
        let text = format!("{} {}", activity_title, package_name).to_lowercase();

        Self::KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(ActivityCategory::General)
    }

    pub fn segment_count(self) -> usize {
        match self {
            ActivityCategory::Diving => 6,
            ActivityCategory::Hiking => 5,
            ActivityCategory::CityTour => 6,
            ActivityCategory::Culinary => 5,
            ActivityCategory::General => 4,
        }
    }
}
