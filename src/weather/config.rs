use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct WeatherQuery<'a> {
    pub q: &'a str,
    pub appid: &'a str,
    pub units: &'static str,
}

/// Subset of the OpenWeatherMap "current weather" payload. `cod` is a number
/// on success and a string on errors, so it is kept loosely typed.
#[derive(Clone, Debug, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub cod: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
    pub main: Option<MainReadings>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

impl WeatherResponse {
    pub fn is_ok(&self) -> bool {
        match &self.cod {
            serde_json::Value::Number(n) => n.as_i64() == Some(200),
            serde_json::Value::String(s) => s == "200",
            _ => false,
        }
    }
}
