pub mod client;
pub mod models;

pub use client::WeatherClient;
pub use models::{kelvin_to_celsius, CityTemperature};
