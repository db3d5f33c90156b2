pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod types;
