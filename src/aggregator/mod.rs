pub mod handler;
pub mod response;
pub mod sources;

pub use handler::{PlaylistAggregator, StageError};
pub use response::{format_temperature, AggregatedResponse};
pub use sources::{PlaylistSource, TemperatureSource};
