use std::{path::PathBuf, time::Duration};

use crate::error::BookingError;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const PREFERENCES_PATH: &str = "preferences.json";
/// Booking forms nobody touched for this long are dropped.
pub const FORM_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend_base_url: String,
    pub preferences_path: PathBuf,
    /// Left unset the http client keeps its own default.
    pub backend_timeout: Option<Duration>,
    pub cors_allowed_origin: Option<String>,
    pub form_idle_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, BookingError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `get` so tests don't have to mutate the process env.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, BookingError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let backend_base_url = get("BACKEND_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| BookingError::Config("BACKEND_BASE_URL must be set".to_string()))?;

        let host = get("HOST").unwrap_or_else(|| HOST.to_string());
        let port = get("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(PORT);
        let preferences_path = get("PREFERENCES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(PREFERENCES_PATH));
        let backend_timeout = get("BACKEND_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let cors_allowed_origin = get("CORS_ALLOWED_ORIGIN").filter(|o| !o.is_empty());
        let form_idle_timeout = get("FORM_IDLE_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(FORM_IDLE_TIMEOUT);

        Ok(Self {
            host,
            port,
            backend_base_url,
            preferences_path,
            backend_timeout,
            cors_allowed_origin,
            form_idle_timeout,
        })
    }
}
