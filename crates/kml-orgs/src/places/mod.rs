mod google;
mod response;

pub use google::{GooglePlacesClient, PlacesClientError};

use std::fmt::Debug;

/// Address and phone resolved through a two-step place lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceDetails {
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Resolves business names to postal data. Implementations report every
/// failure as absent data; callers fall back or skip.
pub trait PlaceLookup: Debug {
    fn resolve_address(&self, business_name: &str) -> Option<String>;
    fn resolve_details(&self, business_name: &str) -> PlaceDetails;
}

/// Lookup used when the places service is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLookup;

impl PlaceLookup for NoopLookup {
    fn resolve_address(&self, _business_name: &str) -> Option<String> {
        None
    }

    fn resolve_details(&self, _business_name: &str) -> PlaceDetails {
        PlaceDetails::default()
    }
}
