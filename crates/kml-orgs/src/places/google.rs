use reqwest::Url;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use super::{response, PlaceDetails, PlaceLookup};
use crate::config::PlacesConfig;

const FIND_PLACE_PATH: &str = "findplacefromtext/json";
const DETAILS_PATH: &str = "details/json";

#[derive(Debug, thiserror::Error)]
pub enum PlacesClientError {
    #[error("places runtime unavailable: {0}")]
    Runtime(String),
    #[error("places http client unavailable: {0}")]
    Http(String),
    #[error("invalid places base url '{value}': {message}")]
    BaseUrl { value: String, message: String },
}

/// Google Places web service client.
///
/// Wraps the async reqwest client in an owned runtime so the extractor can
/// issue one blocking lookup at a time. No retries are attempted and no
/// timeout applies unless one is configured.
pub struct GooglePlacesClient {
    http: reqwest::Client,
    runtime: Runtime,
    api_key: String,
    base_url: Url,
}

impl GooglePlacesClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesClientError> {
        let runtime = Runtime::new().map_err(|err| PlacesClientError::Runtime(err.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| PlacesClientError::Http(err.to_string()))?;

        Ok(Self {
            http,
            runtime,
            api_key: config.api_key.clone(),
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    pub(crate) fn find_place_url(&self, business_name: &str, fields: &str) -> Option<Url> {
        self.endpoint(
            FIND_PLACE_PATH,
            &[
                ("input", business_name),
                ("inputtype", "textquery"),
                ("fields", fields),
            ],
        )
    }

    pub(crate) fn details_url(&self, place_id: &str) -> Option<Url> {
        self.endpoint(
            DETAILS_PATH,
            &[
                ("place_id", place_id),
                ("fields", "formatted_address,formatted_phone_number"),
            ],
        )
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Option<Url> {
        let mut url = match self.base_url.join(path) {
            Ok(url) => url,
            Err(err) => {
                warn!(path, error = %err, "unable to build places endpoint");
                return None;
            }
        };
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Some(url)
    }

    /// Issues a GET and returns the body of a successful response.
    fn fetch(&self, url: Url) -> Option<String> {
        let result = self.runtime.block_on(async {
            let response = self.http.get(url).send().await?.error_for_status()?;
            response.text().await
        });

        match result {
            Ok(body) => Some(body),
            Err(err) => {
                // reqwest errors embed the request url, which carries the api key
                warn!(error = %err.without_url(), "places request failed");
                None
            }
        }
    }

    fn place_id(&self, business_name: &str) -> Option<String> {
        let body = self.fetch(self.find_place_url(business_name, "place_id")?)?;
        decoded(response::candidate_place_id(&body)).flatten()
    }
}

impl std::fmt::Debug for GooglePlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePlacesClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PlaceLookup for GooglePlacesClient {
    fn resolve_address(&self, business_name: &str) -> Option<String> {
        info!(business = business_name, "fetching address from places service");
        let address = self
            .find_place_url(business_name, "formatted_address")
            .and_then(|url| self.fetch(url))
            .and_then(|body| decoded(response::candidate_address(&body)).flatten());

        match &address {
            Some(address) => info!(business = business_name, %address, "resolved address"),
            None => warn!(business = business_name, "no address found"),
        }
        address
    }

    fn resolve_details(&self, business_name: &str) -> PlaceDetails {
        info!(business = business_name, "fetching place details");
        let Some(place_id) = self.place_id(business_name) else {
            warn!(business = business_name, "no place candidate found");
            return PlaceDetails::default();
        };

        let details = self
            .details_url(&place_id)
            .and_then(|url| self.fetch(url))
            .and_then(|body| decoded(response::place_details(&body)))
            .unwrap_or_default();

        if details.address.is_none() {
            warn!(business = business_name, %place_id, "place details unavailable");
        }
        details
    }
}

fn parse_base_url(raw: &str) -> Result<Url, PlacesClientError> {
    let normalized = format!("{}/", raw.trim().trim_end_matches('/'));
    Url::parse(&normalized).map_err(|err| PlacesClientError::BaseUrl {
        value: raw.to_string(),
        message: err.to_string(),
    })
}

fn decoded<T>(result: Result<T, serde_json::Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, "places response could not be decoded");
            None
        }
    }
}
