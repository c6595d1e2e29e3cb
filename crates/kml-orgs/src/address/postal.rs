use libpostal_rs::LibPostal;
use tokio::runtime::Runtime;
use tracing::info;

use super::{ComponentParser, PostalComponents, TaggingError};

#[derive(Debug, thiserror::Error)]
pub enum PostalError {
    #[error("address parser runtime unavailable: {0}")]
    Runtime(String),
    #[error("failed to load address parser models: {0}")]
    Init(String),
}

/// Statistical address parser backed by libpostal.
///
/// Model loading is async; it runs once on a short-lived runtime and every
/// parse afterwards is a plain blocking call.
pub struct PostalParser {
    postal: LibPostal,
}

impl PostalParser {
    pub fn new() -> Result<Self, PostalError> {
        let runtime = Runtime::new().map_err(|err| PostalError::Runtime(err.to_string()))?;
        let postal = runtime
            .block_on(LibPostal::new())
            .map_err(|err| PostalError::Init(err.to_string()))?;
        info!("address parser models loaded");
        Ok(Self { postal })
    }
}

impl std::fmt::Debug for PostalParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostalParser").finish_non_exhaustive()
    }
}

impl ComponentParser for PostalParser {
    fn parse_components(&self, input: &str) -> Result<PostalComponents, TaggingError> {
        let parsed = self
            .postal
            .parse_address(input)
            .map_err(|err| TaggingError::Parser {
                input: input.trim().to_string(),
                message: err.to_string(),
            })?;

        Ok(PostalComponents {
            house_number: parsed.house_number,
            road: parsed.road,
            unit: parsed.unit,
            city: parsed.city,
            state: parsed.state,
            postcode: parsed.postcode,
            country: parsed.country,
        })
    }
}
