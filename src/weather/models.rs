use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// Current temperature for a city, as reported by the weather provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTemperature {
    /// The provider's canonical city name, which may differ from the query.
    pub city: String,
    /// Degrees Celsius, truncated toward zero.
    pub temperature: i32,
}

/// Convert Kelvin to whole degrees Celsius, truncating toward zero.
pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    (kelvin - KELVIN_OFFSET).trunc() as i32
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherResponse {
    pub name: Option<String>,
    pub main: Option<MainReadings>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReadings {
    pub temp: Option<f64>,
}
