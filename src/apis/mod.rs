// Shared HTTP client, HTML helpers and record assembly
pub mod base;
pub mod factory;

// Google Places museum directory
pub mod places;

// One adapter per site
pub mod fubon;
pub mod huashan;
pub mod moca;
pub mod npm;
pub mod ntnu;
pub mod songshan;
pub mod tfam;

pub use base::HttpFetcher;
pub use factory::{create_date_normalizer, create_source};
pub use places::PlacesClient;
