use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::config::{endpoint, Config};
use crate::error::{AppError, Provider, Result};
use crate::weather::models::{kelvin_to_celsius, CityTemperature, WeatherResponse};

const CURRENT_WEATHER_PATH: &str = "data/2.5/weather";

/// Client for the OpenWeatherMap current-weather endpoint.
#[derive(Clone)]
pub struct WeatherClient {
    http_client: Client,
    api_key: String,
    base_url: Url,
}

impl WeatherClient {
    pub fn new(config: &Config, http_client: Client) -> Self {
        Self {
            http_client,
            api_key: config.weather_api_key.clone(),
            base_url: config.weather_api_base.clone(),
        }
    }

    /// Look up the current temperature for `city`.
    ///
    /// Every failure (transport, non-2xx, missing `main.temp`) comes back as an
    /// error whose public message is "Unexpected response format".
    pub async fn fetch_temperature(&self, city: &str) -> Result<CityTemperature> {
        let url = endpoint(&self.base_url, CURRENT_WEATHER_PATH);
        debug!("Fetching current weather for {}", city);

        let response = self
            .http_client
            .get(url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the API key.
                let e = e.without_url();
                error!("Error fetching weather data for {}: {}", city, e);
                AppError::upstream(Provider::Weather, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Weather API returned {} for {}: {}",
                status, city, error_text
            );
            return Err(AppError::upstream(
                Provider::Weather,
                format!("status {}", status),
            ));
        }

        let data: Value = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Weather API returned a non-JSON body for {}: {}", city, e);
            AppError::unexpected_format(Provider::Weather, e.to_string())
        })?;

        let reading = parse_temperature(&data).ok_or_else(|| {
            error!("Unexpected response format: {}", data);
            AppError::unexpected_format(Provider::Weather, "missing main.temp")
        })?;

        let (name, kelvin) = reading;
        let result = CityTemperature {
            city: name.unwrap_or_else(|| city.to_string()),
            temperature: kelvin_to_celsius(kelvin),
        };

        info!(
            "Current temperature in {}: {} degrees Celsius",
            result.city, result.temperature
        );

        Ok(result)
    }
}

fn parse_temperature(data: &Value) -> Option<(Option<String>, f64)> {
    let parsed: WeatherResponse = serde_json::from_value(data.clone()).ok()?;
    let kelvin = parsed.main?.temp?;
    Some((parsed.name, kelvin))
}
