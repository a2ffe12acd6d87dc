use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BookingError;

// Custom deserializer for optional participant bounds; the backend sometimes sends floats
fn deserialize_optional_rounded_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Number(n)) => {
            if let Some(i) = n.as_u64() {
                Ok(u32::try_from(i).ok())
            } else if let Some(f) = n.as_f64() {
                let f = f.ceil();
                Ok((f >= 0.0 && f <= u32::MAX as f64).then(|| f as u32))
            } else {
                Ok(None)
            }
        }
        Some(serde_json::Value::String(s)) => Ok(s.trim().parse().ok()),
        _ => Ok(None),
    }
}

// Prices arrive either as numbers or numeric strings
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Ok(s.trim().parse().unwrap_or(0.0)),
        _ => Ok(0.0),
    }
}

/// A purchasable variant of an activity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display price as authored by the backend.
    #[serde(default)]
    pub price: String,
    #[serde(deserialize_with = "deserialize_price", default)]
    pub price_per_person: f64,
    #[serde(deserialize_with = "deserialize_optional_rounded_u32", default)]
    pub min_participants: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_rounded_u32", default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub host_bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_image_url: Option<String>,
    /// `HH:mm` or `HH:mm:ss`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDetail {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetailDataModel {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub provider_detail: ProviderDetail,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub terms: String,
    /// Host name to packages. Hosts iterate alphabetically, packages keep insertion order.
    #[serde(default)]
    pub packages_by_host: BTreeMap<String, Vec<Package>>,
}

impl ActivityDetailDataModel {
    pub fn all_packages(&self) -> impl Iterator<Item = &Package> {
        self.packages_by_host.values().flatten()
    }

    pub fn find_package(&self, package_id: &str) -> Option<&Package> {
        self.all_packages().find(|p| p.id == package_id)
    }

    /// Package ids must be unique across every host group.
    pub fn check_unique_package_ids(&self) -> Result<(), BookingError> {
        let mut seen = HashSet::new();
        for package in self.all_packages() {
            if !seen.insert(package.id.as_str()) {
                return Err(BookingError::DuplicatePackage(package.id.clone()));
            }
        }
        Ok(())
    }
}

/// Activity record as returned by the search endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(deserialize_with = "deserialize_optional_rounded_u32", default)]
    pub duration_minutes: Option<u32>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn package(id: &str, host: &str) -> Package {
        Package {
            id: id.to_string(),
            name: format!("Package {}", id),
            description: "Min.2 - Max.8 participants".to_string(),
            price: "Rp500.000".to_string(),
            price_per_person: 500_000.0,
            min_participants: Some(2),
            max_participants: Some(8),
            host_name: host.to_string(),
            host_bio: format!("{} has guided trips for ten years", host),
            host_image_url: None,
            start_time: Some("08:00".to_string()),
            end_time: Some("16:00".to_string()),
        }
    }

    pub fn activity() -> ActivityDetailDataModel {
        let mut packages_by_host = BTreeMap::new();
        packages_by_host.insert(
            "Wayan".to_string(),
            vec![package("p-3", "Wayan"), package("p-1", "Wayan")],
        );
        packages_by_host.insert("Ayu".to_string(), vec![package("p-2", "Ayu")]);

        ActivityDetailDataModel {
            id: "act-1".to_string(),
            title: "Amazing Snorkeling Adventure".to_string(),
            location: "Nusa Penida".to_string(),
            image_urls: vec![],
            duration_minutes: 480,
            description: "Crystal clear water".to_string(),
            provider_detail: ProviderDetail {
                name: "Penida Trips".to_string(),
                description: "Local operator".to_string(),
                image_url: None,
            },
            facilities: vec!["Snorkel gear".to_string()],
            terms: "No refunds within 24h".to_string(),
            packages_by_host,
        }
    }
}
