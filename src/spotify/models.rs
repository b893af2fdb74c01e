use std::fmt;

use serde::{Deserialize, Serialize};

/// One album returned by a genre search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub name: String,
    /// First listed artist only.
    pub artist: String,
    /// Raw provider date string ("2021", "2021-01" or "2021-01-05").
    pub release_date: String,
    pub url: String,
    /// The genre that was searched for, not anything the provider reported.
    pub genre: String,
}

/// Bearer token from the client-credentials flow.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub albums: Option<AlbumPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumPage {
    pub items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiAlbum {
    pub name: String,
    pub artists: Vec<ApiArtist>,
    pub release_date: String,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExternalUrls {
    pub spotify: String,
}

impl ApiAlbum {
    /// Returns `None` when the album has no artists.
    pub fn into_summary(self, genre: &str) -> Option<AlbumSummary> {
        let artist = self.artists.into_iter().next()?.name;
        Some(AlbumSummary {
            name: self.name,
            artist,
            release_date: self.release_date,
            url: self.external_urls.spotify,
            genre: genre.to_string(),
        })
    }
}

#[cfg(test)]
impl AlbumSummary {
    pub fn mock(name: &str, artist: &str, genre: &str) -> Self {
        Self {
            name: name.to_string(),
            artist: artist.to_string(),
            release_date: "2021-01-01".to_string(),
            url: format!("https://open.spotify.com/album/{}", name.to_lowercase().replace(' ', "-")),
            genre: genre.to_string(),
        }
    }
}
