//! Helpers for running the clients against in-process fake upstreams, and
//! stand-in stages for the aggregator.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use crate::aggregator::{PlaylistSource, TemperatureSource};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::spotify::AlbumSummary;
use crate::weather::CityTemperature;

/// Serve `router` on a random local port and return its base URL.
pub(crate) async fn spawn_upstream(router: Router) -> (Url, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");

    let addr = listener.local_addr().expect("Failed to get local address");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Fake upstream failed");
    });

    let base = Url::parse(&format!("http://{}", addr)).expect("Invalid fake upstream URL");
    (base, handle)
}

pub(crate) fn test_config(weather: &Url, accounts: &Url, api: &Url) -> Config {
    let mut config = Config::new("test-weather-key", "test-client-id", "test-client-secret")
        .expect("Failed to build test config");
    config.weather_api_base = weather.clone();
    config.spotify_accounts_base = accounts.clone();
    config.spotify_api_base = api.clone();
    config.request_timeout = Duration::from_secs(5);
    config
}

type ErrorFactory = Box<dyn Fn() -> AppError + Send + Sync>;

/// Temperature stage that answers from memory and records the cities asked for.
pub(crate) struct FakeWeather {
    reading: std::result::Result<CityTemperature, ErrorFactory>,
    calls: Mutex<Vec<String>>,
}

impl FakeWeather {
    pub fn reporting(city: &str, temperature: i32) -> Self {
        Self {
            reading: Ok(CityTemperature {
                city: city.to_string(),
                temperature,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(make_error: impl Fn() -> AppError + Send + Sync + 'static) -> Self {
        Self {
            reading: Err(Box::new(make_error)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TemperatureSource for FakeWeather {
    async fn fetch_temperature(&self, city: &str) -> Result<CityTemperature> {
        self.calls.lock().unwrap().push(city.to_string());
        match &self.reading {
            Ok(reading) => Ok(reading.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

/// Playlist stage that answers from memory and records the genres asked for.
pub(crate) struct FakePlaylists {
    albums: std::result::Result<Vec<AlbumSummary>, ErrorFactory>,
    calls: Mutex<Vec<String>>,
}

impl FakePlaylists {
    pub fn returning(albums: Vec<AlbumSummary>) -> Self {
        Self {
            albums: Ok(albums),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(make_error: impl Fn() -> AppError + Send + Sync + 'static) -> Self {
        Self {
            albums: Err(Box::new(make_error)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaylistSource for FakePlaylists {
    async fn fetch_playlist(&self, genre: &str) -> Result<Vec<AlbumSummary>> {
        self.calls.lock().unwrap().push(genre.to_string());
        match &self.albums {
            Ok(albums) => Ok(albums.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}
