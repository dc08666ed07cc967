//! Environment configuration.

use tourguide_client::DEFAULT_BASE_URL;
use tourguide_location::domain::fixes::TrustPolicy;
use tourguide_session::domain::config::TourConfig;

use crate::error::AppError;

/// Backend address.
pub const ENV_API_BASE_URL: &str = "TOURGUIDE_API_BASE_URL";
/// `/speak` search radius.
pub const ENV_SPEAK_RADIUS: &str = "TOURGUIDE_SPEAK_RADIUS";
/// `simulated-only` or `any`.
pub const ENV_TRUST_POLICY: &str = "TOURGUIDE_TRUST_POLICY";
/// Speech rate multiplier.
pub const ENV_SPEECH_RATE: &str = "TOURGUIDE_SPEECH_RATE";

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Backend address.
    pub base_url: String,
    /// Session tunables.
    pub tour: TourConfig,
}

impl CliConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let base_url = lookup(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "{ENV_API_BASE_URL} must be an http(s) URL, got {base_url:?}"
            )));
        }

        let mut tour = TourConfig::default();
        if let Some(raw) = lookup(ENV_SPEAK_RADIUS) {
            tour.speak_radius = parse_positive(ENV_SPEAK_RADIUS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TRUST_POLICY) {
            tour.trust_policy = raw
                .parse::<TrustPolicy>()
                .map_err(|e| AppError::Config(format!("{ENV_TRUST_POLICY}: {e}")))?;
        }
        if let Some(raw) = lookup(ENV_SPEECH_RATE) {
            #[allow(clippy::cast_possible_truncation)]
            let rate = parse_positive(ENV_SPEECH_RATE, &raw)? as f32;
            tour.utterance.rate = rate;
        }

        Ok(Self { base_url, tour })
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<f64, AppError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} must be a number: {e}")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Config(format!(
            "{key} must be a positive number, got {value}"
        )));
    }
    Ok(value)
}
