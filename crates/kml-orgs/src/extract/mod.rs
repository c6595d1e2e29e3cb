mod policy;
mod record;

#[cfg(test)]
mod tests;

pub use policy::{ExtractionPolicy, LookupMode, NameSource};
pub use record::{
    ExtractionReport, OrganizationRecord, SkipReason, SkippedPlacemark, UNKNOWN_CATEGORY,
};

use std::path::Path;

use tracing::{debug, info};

use crate::address::{self, AddressNormalizer};
use crate::kml::{self, Placemark};
use crate::places::PlaceLookup;

const SEARCH_URL_PREFIX: &str = "https://www.google.com/search?q=";
const UNAVAILABLE_SENTINEL: &str = "not available";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read KML input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid KML document: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("placemark {index} has no '{field}' value to name it")]
    MissingName { index: usize, field: &'static str },
}

/// Website used when a placemark has none: a search for the organization name.
pub fn fallback_website(name: &str) -> String {
    format!("{SEARCH_URL_PREFIX}{name}")
}

enum PlacemarkOutcome {
    Emitted(OrganizationRecord),
    Skipped(SkippedPlacemark),
}

#[derive(Debug, Default)]
struct ResolvedAddress {
    address: Option<String>,
    phone: Option<String>,
}

/// Turns the placemarks of a KML document into organization records
/// according to an [`ExtractionPolicy`].
#[derive(Debug)]
pub struct PlacemarkExtractor<'a> {
    policy: ExtractionPolicy,
    lookup: &'a dyn PlaceLookup,
    normalizer: &'a AddressNormalizer,
}

impl<'a> PlacemarkExtractor<'a> {
    pub fn new(
        policy: ExtractionPolicy,
        lookup: &'a dyn PlaceLookup,
        normalizer: &'a AddressNormalizer,
    ) -> Self {
        Self {
            policy,
            lookup,
            normalizer,
        }
    }

    pub fn policy(&self) -> &ExtractionPolicy {
        &self.policy
    }

    /// Reads and extracts a KML file, tagging records with the file's base name.
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionReport, ExtractError> {
        let path = path.as_ref();
        info!(converter = self.policy.label, path = %path.display(), "reading KML file");
        let text = std::fs::read_to_string(path)?;
        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.extract_document(&text, &source_file)
    }

    pub fn extract_document(
        &self,
        kml_text: &str,
        source_file: &str,
    ) -> Result<ExtractionReport, ExtractError> {
        let document = kml::parse(kml_text)?;
        let placemarks: Vec<Placemark<'_, '_>> = kml::placemarks(&document).collect();
        let total = placemarks.len();
        info!(converter = self.policy.label, total, "found placemark entries");

        let mut report = ExtractionReport::default();
        for (offset, placemark) in placemarks.iter().enumerate() {
            let index = offset + 1;
            debug!(converter = self.policy.label, index, total, "processing placemark");

            match self.process(index, placemark, source_file)? {
                PlacemarkOutcome::Emitted(record) => report.records.push(record),
                PlacemarkOutcome::Skipped(skipped) => {
                    info!(
                        converter = self.policy.label,
                        index,
                        name = %skipped.name,
                        reason = skipped.reason.label(),
                        "skipping placemark"
                    );
                    report.skipped.push(skipped);
                }
            }
        }

        info!(
            converter = self.policy.label,
            emitted = report.records.len(),
            skipped = report.skipped.len(),
            "extraction complete"
        );
        Ok(report)
    }

    fn process(
        &self,
        index: usize,
        placemark: &Placemark<'_, '_>,
        source_file: &str,
    ) -> Result<PlacemarkOutcome, ExtractError> {
        let name = self.resolve_name(index, placemark)?;
        debug!(index, business = %name, "resolved business name");
        let skip = |reason| {
            Ok(PlacemarkOutcome::Skipped(SkippedPlacemark {
                index,
                name: name.clone(),
                reason,
            }))
        };

        let category = placemark
            .folder_name()
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        let resolved = self.resolve_address(&name, placemark);
        let Some(raw_address) = resolved.address else {
            return skip(SkipReason::NoAddress);
        };

        let normalized = self.normalizer.normalize(&raw_address);
        let address = address::apply_short_address_policy(&name, &normalized.text);
        let state = normalized.state.filter(|state| !state.is_empty());
        let city = normalized.city;

        let website = resolve_website(&name, placemark.data_value(self.policy.website_field));
        let phone = self
            .policy
            .phone_field
            .and_then(|field| placemark.data_value(field))
            .or(resolved.phone);

        if self.policy.require_state && state.is_none() {
            return skip(SkipReason::MissingState);
        }

        Ok(PlacemarkOutcome::Emitted(OrganizationRecord {
            name,
            address,
            city,
            state,
            website,
            phone,
            category,
            source_file: source_file.to_string(),
        }))
    }

    fn resolve_name(&self, index: usize, placemark: &Placemark<'_, '_>) -> Result<String, ExtractError> {
        match self.policy.name_source {
            NameSource::Element => Ok(placemark.name().unwrap_or_default()),
            NameSource::DataField(field) => placemark
                .data_value(field)
                .ok_or(ExtractError::MissingName { index, field }),
        }
    }

    /// Inline address first, then the configured lookup.
    fn resolve_address(&self, name: &str, placemark: &Placemark<'_, '_>) -> ResolvedAddress {
        if let Some(address) = placemark.address() {
            return ResolvedAddress {
                address: Some(address),
                phone: None,
            };
        }

        let resolved = match self.policy.lookup_mode {
            LookupMode::AddressOnly => ResolvedAddress {
                address: self.lookup.resolve_address(name),
                phone: None,
            },
            LookupMode::Details => {
                let details = self.lookup.resolve_details(name);
                ResolvedAddress {
                    address: details.address,
                    phone: details.phone,
                }
            }
        };

        ResolvedAddress {
            address: resolved
                .address
                .map(|address| address.trim().to_string())
                .filter(|address| !address.is_empty()),
            ..resolved
        }
    }
}

fn resolve_website(name: &str, explicit: Option<String>) -> String {
    match explicit {
        Some(website) if !website.eq_ignore_ascii_case(UNAVAILABLE_SENTINEL) => website,
        _ => fallback_website(name),
    }
}
