use serde::{Deserialize, Serialize};

use crate::genre::Genre;
use crate::spotify::AlbumSummary;

/// Body of a successful `/api/playlist/{city}/` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    pub city: String,
    pub temperature: String,
    pub genre: Genre,
    pub playlists: Vec<AlbumSummary>,
}

impl AggregatedResponse {
    pub fn new(city: String, temperature: i32, genre: Genre, playlists: Vec<AlbumSummary>) -> Self {
        Self {
            city,
            temperature: format_temperature(temperature),
            genre,
            playlists,
        }
    }
}

/// "15 degree celcius". Existing clients match on this exact spelling.
pub fn format_temperature(temperature: i32) -> String {
    format!("{} degree celcius", temperature)
}
