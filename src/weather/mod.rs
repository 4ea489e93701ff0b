pub mod config;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use thiserror::Error;

use crate::config::Config;
use crate::weather::config::{WeatherQuery, WeatherResponse};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("weather API key is not configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),
    #[error("reading response failed: {0}")]
    Body(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("weather service rejected '{city}': {reason}")]
    Rejected { city: String, reason: String },
}

/// City name to current temperature in °C.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn current_temperature(&self, city: &str) -> Result<f64, LookupError>;
}

pub struct OpenWeatherClient {
    client: ClientWithMiddleware,
    url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .build_with_max_retries(config.http_retries);

        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            url: config.openweather_url.clone(),
            api_key: config.openweather_api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn current_temperature(&self, city: &str) -> Result<f64, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::MissingApiKey)?;

        let query = WeatherQuery {
            q: city,
            appid: api_key,
            units: "metric",
        };

        let response = self
            .client
            .get(&self.url)
            .query(&query)
            .header("Accept", "application/json")
            .send()
            .await?;

        let text = response.text().await?;
        let temperature = parse_temperature(city, &text)?;
        log::debug!("🌡️ {} is {}°C", city, temperature);

        Ok(temperature)
    }
}

/// Error payloads (`{"cod":"404","message":"city not found"}`) come back as
/// HTTP errors too, so the body decides, not the status line.
pub fn parse_temperature(city: &str, body: &str) -> Result<f64, LookupError> {
    let response = serde_json::from_str::<WeatherResponse>(body)?;

    match (&response.main, response.is_ok()) {
        (Some(main), true) if main.temp.is_finite() => Ok(main.temp),
        _ => Err(LookupError::Rejected {
            city: city.to_string(),
            reason: response
                .message
                .unwrap_or_else(|| format!("cod {}", response.cod)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_successful_payload() {
        let body = r#"{"coord":{"lon":37.6,"lat":55.75},"main":{"temp":27.4,"humidity":40},"cod":200}"#;
        assert_eq!(parse_temperature("Moscow", body).unwrap(), 27.4);
    }

    #[test]
    fn city_not_found_is_rejected() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        match parse_temperature("Atlantis", body) {
            Err(LookupError::Rejected { city, reason }) => {
                assert_eq!(city, "Atlantis");
                assert_eq!(reason, "city not found");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn garbage_body_is_decode_error() {
        assert!(matches!(
            parse_temperature("Moscow", "<html>502</html>"),
            Err(LookupError::Decode(_))
        ));
    }

    #[test]
    fn missing_main_block_is_rejected() {
        let body = r#"{"cod":200}"#;
        assert!(matches!(
            parse_temperature("Moscow", body),
            Err(LookupError::Rejected { .. })
        ));
    }

    #[tokio::test]
    async fn client_without_key_is_unavailable() {
        let config = Config::for_tests();
        let client = OpenWeatherClient::new(&config).unwrap();
        assert!(matches!(
            client.current_temperature("Moscow").await,
            Err(LookupError::MissingApiKey)
        ));
    }
}
