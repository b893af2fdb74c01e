//! The two upstream lookups the aggregator depends on.
//!
//! Implemented by the real provider clients and by test doubles.

use async_trait::async_trait;

use crate::error::Result;
use crate::spotify::{AlbumSummary, SpotifyClient};
use crate::weather::{CityTemperature, WeatherClient};

#[async_trait]
pub trait TemperatureSource: Send + Sync {
    async fn fetch_temperature(&self, city: &str) -> Result<CityTemperature>;
}

#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch_playlist(&self, genre: &str) -> Result<Vec<AlbumSummary>>;
}

#[async_trait]
impl TemperatureSource for WeatherClient {
    async fn fetch_temperature(&self, city: &str) -> Result<CityTemperature> {
        WeatherClient::fetch_temperature(self, city).await
    }
}

#[async_trait]
impl PlaylistSource for SpotifyClient {
    async fn fetch_playlist(&self, genre: &str) -> Result<Vec<AlbumSummary>> {
        SpotifyClient::fetch_playlist(self, genre).await
    }
}
