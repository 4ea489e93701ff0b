use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_OPENWEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_CITY: &str = "Moscow";
pub const DEFAULT_FALLBACK_TEMPERATURE_C: f64 = 20.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone)]
pub struct Config {
    pub telegram_token: String,
    pub openweather_api_key: Option<String>,
    pub openweather_url: String,
    pub default_city: String,
    pub fallback_temperature_c: f64,
    pub http_timeout_secs: u64,
    pub http_retries: u32,
    /// `None` when `WIZARD_TIMEOUT_MINUTES` is 0.
    pub wizard_timeout: Option<chrono::Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openweather_url", &self.openweather_url)
            .field("weather_enabled", &self.openweather_api_key.is_some())
            .field("default_city", &self.default_city)
            .field("fallback_temperature_c", &self.fallback_temperature_c)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_retries", &self.http_retries)
            .field("wizard_timeout", &self.wizard_timeout)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let telegram_token = get("TELEGRAM_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;

        Ok(Self {
            telegram_token,
            openweather_api_key: get("OPENWEATHER_API_KEY"),
            openweather_url: get("OPENWEATHER_URL")
                .unwrap_or_else(|| DEFAULT_OPENWEATHER_URL.to_string()),
            default_city: get("DEFAULT_CITY").unwrap_or_else(|| DEFAULT_CITY.to_string()),
            fallback_temperature_c: parse_or(
                "FALLBACK_TEMPERATURE_C",
                get("FALLBACK_TEMPERATURE_C"),
                DEFAULT_FALLBACK_TEMPERATURE_C,
            )?,
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", get("HTTP_TIMEOUT_SECS"), 10)?,
            http_retries: parse_or("HTTP_RETRIES", get("HTTP_RETRIES"), 1)?,
            wizard_timeout: wizard_timeout_from(parse_or(
                "WIZARD_TIMEOUT_MINUTES",
                get("WIZARD_TIMEOUT_MINUTES"),
                30,
            )?)?,
        })
    }

    pub fn wizard_timeout(&self) -> Option<chrono::Duration> {
        self.wizard_timeout
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|key| (key == "TELEGRAM_TOKEN").then(|| "test-token".to_string()))
            .expect("test config")
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// 0 disables expiry; negative or unrepresentable durations are rejected.
fn wizard_timeout_from(minutes: i64) -> Result<Option<chrono::Duration>, ConfigError> {
    let invalid = || ConfigError::Invalid {
        key: "WIZARD_TIMEOUT_MINUTES",
        value: minutes.to_string(),
    };

    match minutes {
        0 => Ok(None),
        m if m < 0 => Err(invalid()),
        m => chrono::Duration::try_minutes(m).map(Some).ok_or_else(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_applied() {
        let config = config_from(&[("TELEGRAM_TOKEN", "abc")]).unwrap();
        assert_eq!(config.telegram_token, "abc");
        assert_eq!(config.openweather_api_key, None);
        assert_eq!(config.openweather_url, DEFAULT_OPENWEATHER_URL);
        assert_eq!(config.default_city, "Moscow");
        assert_eq!(config.fallback_temperature_c, 20.0);
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.http_retries, 1);
        assert_eq!(config.wizard_timeout(), Some(chrono::Duration::minutes(30)));
    }

    #[test]
    fn token_is_required() {
        assert_eq!(
            config_from(&[]).err(),
            Some(ConfigError::Missing("TELEGRAM_TOKEN"))
        );
        assert_eq!(
            config_from(&[("TELEGRAM_TOKEN", "  ")]).err(),
            Some(ConfigError::Missing("TELEGRAM_TOKEN"))
        );
    }

    #[test]
    fn teloxide_token_is_accepted() {
        let config = config_from(&[("TELOXIDE_TOKEN", "xyz")]).unwrap();
        assert_eq!(config.telegram_token, "xyz");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("OPENWEATHER_API_KEY", "key"),
            ("DEFAULT_CITY", "Sochi"),
            ("FALLBACK_TEMPERATURE_C", "18.5"),
            ("HTTP_RETRIES", "3"),
            ("WIZARD_TIMEOUT_MINUTES", "0"),
        ])
        .unwrap();
        assert_eq!(config.openweather_api_key.as_deref(), Some("key"));
        assert_eq!(config.default_city, "Sochi");
        assert_eq!(config.fallback_temperature_c, 18.5);
        assert_eq!(config.http_retries, 3);
        assert_eq!(config.wizard_timeout(), None);
    }

    #[test]
    fn invalid_number_is_reported() {
        let err = config_from(&[("TELEGRAM_TOKEN", "abc"), ("HTTP_RETRIES", "many")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "HTTP_RETRIES",
                value: "many".to_string()
            }
        );
    }

    #[test]
    fn wizard_timeout_out_of_range_is_rejected() {
        for value in ["9223372036854775807", "-5"] {
            assert_eq!(
                config_from(&[("TELEGRAM_TOKEN", "abc"), ("WIZARD_TIMEOUT_MINUTES", value)]).err(),
                Some(ConfigError::Invalid {
                    key: "WIZARD_TIMEOUT_MINUTES",
                    value: value.to_string()
                }),
                "value {value:?}"
            );
        }

        let config = config_from(&[("TELEGRAM_TOKEN", "abc"), ("WIZARD_TIMEOUT_MINUTES", "1440")]).unwrap();
        assert_eq!(config.wizard_timeout(), Some(chrono::Duration::minutes(1440)));
    }

    #[test]
    fn debug_hides_secrets() {
        let config = config_from(&[("TELEGRAM_TOKEN", "secret-token"), ("OPENWEATHER_API_KEY", "secret-key")])
            .unwrap();
        let shown = format!("{config:?}");
        assert!(!shown.contains("secret"));
    }
}
