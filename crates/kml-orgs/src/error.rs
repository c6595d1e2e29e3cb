use crate::address::PostalError;
use crate::config::ConfigError;
use crate::pipeline::PipelineError;
use crate::places::PlacesClientError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Address(PostalError),
    Places(PlacesClientError),
    Pipeline(PipelineError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Address(err) => write!(f, "address parser error: {}", err),
            AppError::Places(err) => write!(f, "places client error: {}", err),
            AppError::Pipeline(err) => write!(f, "conversion error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Address(err) => Some(err),
            AppError::Places(err) => Some(err),
            AppError::Pipeline(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<PostalError> for AppError {
    fn from(value: PostalError) -> Self {
        Self::Address(value)
    }
}

impl From<PlacesClientError> for AppError {
    fn from(value: PlacesClientError) -> Self {
        Self::Places(value)
    }
}

impl From<PipelineError> for AppError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}
