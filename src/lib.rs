pub mod aggregator;
pub mod config;
pub mod error;
pub mod genre;
pub mod server;
pub mod spotify;
pub mod weather;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{AggregatedResponse, PlaylistAggregator, PlaylistSource, StageError, TemperatureSource};
pub use config::Config;
pub use error::{AppError, Result};
pub use genre::{classify, Genre};
pub use spotify::{AccessToken, AlbumSummary, SpotifyClient};
pub use weather::{CityTemperature, WeatherClient};
