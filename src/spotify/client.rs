use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::{endpoint, Config};
use crate::error::{AppError, Provider, Result};
use crate::spotify::models::{
    AccessToken, AlbumSummary, ApiAlbum, SearchResponse, TokenResponse,
};

const TOKEN_PATH: &str = "api/token";
const SEARCH_PATH: &str = "v1/search";

/// Number of albums requested from, and read out of, a genre search.
pub const SEARCH_PAGE_SIZE: usize = 10;

/// Spotify Web API client authenticated with the client-credentials flow.
///
/// No token is kept between calls; every playlist lookup exchanges the app
/// credentials for a fresh bearer token first.
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: Client,
    client_id: String,
    client_secret: String,
    accounts_base: Url,
    api_base: Url,
}

impl SpotifyClient {
    pub fn new(config: &Config, http_client: Client) -> Self {
        Self {
            http_client,
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            accounts_base: config.spotify_accounts_base.clone(),
            api_base: config.spotify_api_base.clone(),
        }
    }

    pub async fn acquire_token(&self) -> Result<AccessToken> {
        let response = self
            .http_client
            .post(endpoint(&self.accounts_base, TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Error retrieving Spotify access token: {}", e);
                AppError::Auth(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Failed to retrieve access token ({}): {}", status, error_text);
            return Err(AppError::Auth(format!("Token request failed: {}", status)));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to parse token response: {}", e);
            AppError::Auth(format!("Failed to parse token response: {}", e))
        })?;

        match token_response.access_token {
            Some(token) if !token.is_empty() => {
                debug!("Authenticated with Spotify using client credentials");
                Ok(AccessToken::new(token))
            }
            _ => {
                error!("Failed to retrieve access token: response has no access_token");
                Err(AppError::Auth("Response has no access_token".into()))
            }
        }
    }

    /// Search the catalog for albums tagged with `genre`.
    ///
    /// Returns at most [`SEARCH_PAGE_SIZE`] albums, each tagged with `genre`
    /// exactly as passed in.
    pub async fn fetch_playlist(&self, genre: &str) -> Result<Vec<AlbumSummary>> {
        let token = self.acquire_token().await?;

        let limit = SEARCH_PAGE_SIZE.to_string();
        let query = format!("genre:{}", genre);

        let response = self
            .http_client
            .get(endpoint(&self.api_base, SEARCH_PATH))
            .bearer_auth(token.secret())
            .query(&[
                ("q", query.as_str()),
                ("type", "album"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Error fetching albums by genre {}: {}", genre, e);
                AppError::upstream(Provider::Spotify, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Spotify search failed for genre {} ({}): {}",
                genre, status, error_text
            );
            return Err(AppError::upstream(
                Provider::Spotify,
                format!("status {}", status),
            ));
        }

        let data: Value = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Spotify search returned a non-JSON body: {}", e);
            AppError::unexpected_format(Provider::Spotify, e.to_string())
        })?;

        let albums = parse_albums(&data, genre)?;
        info!("Found {} {} albums", albums.len(), genre);

        Ok(albums)
    }
}

fn parse_albums(data: &Value, genre: &str) -> Result<Vec<AlbumSummary>> {
    let items = serde_json::from_value::<SearchResponse>(data.clone())
        .ok()
        .and_then(|search| search.albums)
        .and_then(|page| page.items)
        .ok_or_else(|| {
            error!("Unexpected response format: {}", data);
            AppError::unexpected_format(Provider::Spotify, "missing albums.items")
        })?;

    if items.len() > SEARCH_PAGE_SIZE {
        warn!(
            "Spotify returned {} albums, keeping the first {}",
            items.len(),
            SEARCH_PAGE_SIZE
        );
    }

    items
        .into_iter()
        .take(SEARCH_PAGE_SIZE)
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<ApiAlbum>(item)
                .ok()
                .and_then(|album| album.into_summary(genre))
                .ok_or_else(|| {
                    error!("Unexpected album format at index {}", index);
                    AppError::unexpected_format(
                        Provider::Spotify,
                        format!("album {} is missing name, artist, release date or url", index),
                    )
                })
        })
        .collect()
}
