use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*$").expect("valid phone regex"));

/// Booking contact details, edited field by field.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct TravelerData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl TravelerData {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn has_valid_phone(&self) -> bool {
        let phone = self.phone.trim();
        if !PHONE_RE.is_match(phone) {
            return false;
        }
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        (7..=15).contains(&digits)
    }

    pub fn has_valid_email(&self) -> bool {
        EMAIL_RE.is_match(self.email.trim())
    }

    pub fn is_valid(&self) -> bool {
        self.has_name() && self.has_valid_phone() && self.has_valid_email()
    }
}
