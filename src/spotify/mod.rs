pub mod client;
pub mod models;

pub use client::{SpotifyClient, SEARCH_PAGE_SIZE};
pub use models::{AccessToken, AlbumSummary};
