//! HTTP surface.
//!
//! - `GET /api/playlist/{city}/`: temperature, genre and albums in one body
//! - `GET /api/temperature/{city}/`: the temperature lookup alone
//! - `GET /api/albums/{genre}`: the album search alone
//!
//! Any failure is a 500 with `{"error": "..."}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::aggregator::{PlaylistAggregator, StageError};
use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: message }),
    )
        .into_response()
}

impl IntoResponse for StageError {
    fn into_response(self) -> Response {
        error!("{}", self);
        error_response(self.public_message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{}", self);
        error_response(self.public_message().to_string())
    }
}

pub fn router(aggregator: PlaylistAggregator) -> Router {
    Router::new()
        .route("/api/playlist/{city}/", get(playlist_by_city))
        .route("/api/playlist/{city}", get(playlist_by_city))
        .route("/api/temperature/{city}/", get(temperature_by_city))
        .route("/api/temperature/{city}", get(temperature_by_city))
        .route("/api/albums/{genre}", get(albums_by_genre))
        .route("/api/albums/{genre}/", get(albums_by_genre))
        .with_state(aggregator)
}

async fn playlist_by_city(
    State(aggregator): State<PlaylistAggregator>,
    Path(city): Path<String>,
) -> Response {
    info!("Playlist requested for {}", city);
    match aggregator.build(&city).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn temperature_by_city(
    State(aggregator): State<PlaylistAggregator>,
    Path(city): Path<String>,
) -> Response {
    match aggregator.temperature_source().fetch_temperature(&city).await {
        Ok(reading) => (StatusCode::OK, Json(reading)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn albums_by_genre(
    State(aggregator): State<PlaylistAggregator>,
    Path(genre): Path<String>,
) -> Response {
    match aggregator.playlist_source().fetch_playlist(&genre).await {
        Ok(albums) => (StatusCode::OK, Json(albums)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Bind `bind_addr` and serve until ctrl-c.
pub async fn serve(bind_addr: &str, aggregator: PlaylistAggregator) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(aggregator))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
