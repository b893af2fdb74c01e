use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::aggregator::response::AggregatedResponse;
use crate::aggregator::sources::{PlaylistSource, TemperatureSource};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::genre::classify;
use crate::spotify::SpotifyClient;
use crate::weather::WeatherClient;

/// A failed pipeline stage, naming what was being looked up.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("Failed to fetch temperature for \"{city}\": {source}")]
    Temperature {
        city: String,
        #[source]
        source: AppError,
    },

    #[error("Failed to fetch playlists for genre \"{genre}\": {source}")]
    Playlist {
        genre: String,
        #[source]
        source: AppError,
    },
}

impl StageError {
    /// Caller-facing message: names the subject, hides upstream detail.
    pub fn public_message(&self) -> String {
        match self {
            StageError::Temperature { city, source } => format!(
                "Failed to fetch temperature for \"{}\": {}",
                city,
                source.public_message()
            ),
            StageError::Playlist { genre, source } => format!(
                "Failed to fetch playlists for genre \"{}\": {}",
                genre,
                source.public_message()
            ),
        }
    }
}

/// Runs temperature lookup, genre classification and album search, in that
/// order, for one city.
#[derive(Clone)]
pub struct PlaylistAggregator {
    temperature: Arc<dyn TemperatureSource>,
    playlists: Arc<dyn PlaylistSource>,
}

impl PlaylistAggregator {
    pub fn new(temperature: Arc<dyn TemperatureSource>, playlists: Arc<dyn PlaylistSource>) -> Self {
        Self {
            temperature,
            playlists,
        }
    }

    /// Wire up the real OpenWeatherMap and Spotify clients.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = config.http_client()?;
        let weather = WeatherClient::new(config, http_client.clone());
        let spotify = SpotifyClient::new(config, http_client);

        Ok(Self::new(Arc::new(weather), Arc::new(spotify)))
    }

    pub fn temperature_source(&self) -> &dyn TemperatureSource {
        self.temperature.as_ref()
    }

    pub fn playlist_source(&self) -> &dyn PlaylistSource {
        self.playlists.as_ref()
    }

    /// Build the combined response for `city`.
    ///
    /// The first failing stage ends the request; there is no partial result.
    /// The response echoes `city` as given, not the provider's spelling.
    pub async fn build(&self, city: &str) -> std::result::Result<AggregatedResponse, StageError> {
        let reading = self
            .temperature
            .fetch_temperature(city)
            .await
            .map_err(|source| {
                warn!("Temperature stage failed for {}: {}", city, source);
                StageError::Temperature {
                    city: city.to_string(),
                    source,
                }
            })?;

        let genre = classify(reading.temperature);
        info!(
            "{} is at {} degrees ({}), picking {}",
            city, reading.temperature, reading.city, genre
        );

        let playlists = self
            .playlists
            .fetch_playlist(genre.as_str())
            .await
            .map_err(|source| {
                warn!("Playlist stage failed for genre {}: {}", genre, source);
                StageError::Playlist {
                    genre: genre.to_string(),
                    source,
                }
            })?;

        Ok(AggregatedResponse::new(
            city.to_string(),
            reading.temperature,
            genre,
            playlists,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Provider, TOKEN_FAILURE, UNEXPECTED_FORMAT};
    use crate::genre::Genre;
    use crate::spotify::AlbumSummary;
    use crate::testing::{FakePlaylists, FakeWeather};
    use serde_json::json;

    fn aggregator(weather: &Arc<FakeWeather>, playlists: &Arc<FakePlaylists>) -> PlaylistAggregator {
        PlaylistAggregator::new(weather.clone(), playlists.clone())
    }

    #[tokio::test]
    async fn test_build_london_rock() {
        let weather = Arc::new(FakeWeather::reporting("London", 15));
        let playlists = Arc::new(FakePlaylists::returning(vec![AlbumSummary::mock(
            "Rock Album",
            "Rock Artist",
            "rock",
        )]));

        let response = aggregator(&weather, &playlists).build("London").await.unwrap();

        assert_eq!(weather.calls(), vec!["London".to_string()]);
        assert_eq!(playlists.calls(), vec!["rock".to_string()]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "city": "London",
                "temperature": "15 degree celcius",
                "genre": "rock",
                "playlists": [{
                    "name": "Rock Album",
                    "artist": "Rock Artist",
                    "release_date": "2021-01-01",
                    "url": "https://open.spotify.com/album/rock-album",
                    "genre": "rock"
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_build_echoes_caller_city() {
        let weather = Arc::new(FakeWeather::reporting("São Paulo", 30));
        let playlists = Arc::new(FakePlaylists::returning(Vec::new()));

        let response = aggregator(&weather, &playlists).build("sao paulo").await.unwrap();

        assert_eq!(response.city, "sao paulo");
        assert_eq!(response.genre, Genre::Pop);
        assert_eq!(response.temperature, "30 degree celcius");
        assert!(response.playlists.is_empty());
    }

    #[tokio::test]
    async fn test_build_classifies_cold_as_classical() {
        let weather = Arc::new(FakeWeather::reporting("Oslo", -3));
        let playlists = Arc::new(FakePlaylists::returning(Vec::new()));

        let response = aggregator(&weather, &playlists).build("Oslo").await.unwrap();

        assert_eq!(response.genre, Genre::Classical);
        assert_eq!(playlists.calls(), vec!["classical".to_string()]);
    }

    #[tokio::test]
    async fn test_temperature_failure_stops_pipeline() {
        let weather = Arc::new(FakeWeather::failing(|| {
            AppError::unexpected_format(Provider::Weather, "missing main.temp")
        }));
        let playlists = Arc::new(FakePlaylists::returning(Vec::new()));

        let err = aggregator(&weather, &playlists).build("Atlantis").await.unwrap_err();

        assert!(matches!(err, StageError::Temperature { ref city, .. } if city == "Atlantis"));
        assert_eq!(
            err.public_message(),
            format!("Failed to fetch temperature for \"Atlantis\": {}", UNEXPECTED_FORMAT)
        );
        assert!(playlists.calls().is_empty());
    }

    #[tokio::test]
    async fn test_playlist_failure_names_genre() {
        let weather = Arc::new(FakeWeather::reporting("Lisbon", 26));
        let playlists = Arc::new(FakePlaylists::failing(|| {
            AppError::Auth("invalid_client".into())
        }));

        let err = aggregator(&weather, &playlists).build("Lisbon").await.unwrap_err();

        assert!(matches!(err, StageError::Playlist { ref genre, .. } if genre == "pop"));
        assert_eq!(
            err.public_message(),
            format!("Failed to fetch playlists for genre \"pop\": {}", TOKEN_FAILURE)
        );
        assert!(!err.public_message().contains("invalid_client"));
    }
}
