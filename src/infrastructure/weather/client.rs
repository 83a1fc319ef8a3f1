use super::conditions::describe_weather_code;
use crate::config::WeatherConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("location '{0}' not found")]
    LocationNotFound(String),
    #[error("weather provider returned an unexpected payload: {0}")]
    UnexpectedPayload(String),
}

/// Current conditions at a geocoded location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub conditions: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeoLocation>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    wind_gusts_10m: f64,
    weather_code: u16,
}

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,wind_gusts_10m,weather_code";

/// Open-Meteo client: geocode a place name, then read its current conditions
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherClient {
    pub fn new(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self::with_client(geocoding_url, forecast_url, Client::new())
    }

    pub fn with_client(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            http: client,
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    pub fn from_config(config: &WeatherConfig) -> Self {
        Self::new(&config.geocoding_url, &config.forecast_url)
    }

    pub async fn geocode(&self, location: &str) -> Result<GeoLocation, WeatherError> {
        debug!(location, url = %self.geocoding_url, "Geocoding location");
        let response: GeocodingResponse = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", location), ("count", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::LocationNotFound(location.to_string()))
    }

    pub async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let place = self.geocode(location).await?;
        info!(
            location = place.name.as_str(),
            latitude = place.latitude,
            longitude = place.longitude,
            "Fetching current weather"
        );
        let latitude = place.latitude.to_string();
        let longitude = place.longitude.to_string();
        let response: ForecastResponse = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let current = response
            .current
            .ok_or_else(|| WeatherError::UnexpectedPayload("missing current field".into()))?;

        Ok(WeatherReport {
            temperature: current.temperature_2m,
            feels_like: current.apparent_temperature,
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            wind_gust: current.wind_gusts_10m,
            conditions: describe_weather_code(current.weather_code).to_string(),
            location: place.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_camel_case() {
        let report = WeatherReport {
            temperature: 12.5,
            feels_like: 10.0,
            humidity: 80.0,
            wind_speed: 5.0,
            wind_gust: 9.0,
            conditions: "Overcast".into(),
            location: "Berlin".into(),
        };
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["feelsLike"], 10.0);
        assert_eq!(value["windGust"], 9.0);
        assert_eq!(value["location"], "Berlin");
    }

    #[test]
    fn geocoding_without_results_is_empty() {
        let parsed: GeocodingResponse =
            serde_json::from_str(r#"{"generationtime_ms":0.5}"#).expect("parse");
        assert!(parsed.results.is_none());
    }
}
