pub mod address;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod kml;
pub mod pipeline;
pub mod places;
pub mod telemetry;
