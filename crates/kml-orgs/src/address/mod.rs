mod lexicon;
mod postal;
mod tagger;

#[cfg(test)]
pub(crate) mod testing;

pub use postal::{PostalError, PostalParser};
pub use tagger::{label_components, AddressLabel, TaggedAddress, TaggingError};

use std::fmt::Debug;

use tracing::{debug, warn};

/// Components kept in a normalized address, in output order.
const CANONICAL_ORDER: [AddressLabel; 6] = [
    AddressLabel::AddressNumber,
    AddressLabel::StreetName,
    AddressLabel::StreetNamePostType,
    AddressLabel::PlaceName,
    AddressLabel::StateName,
    AddressLabel::ZipCode,
];

/// Raw components reported by a statistical address parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalComponents {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

/// Splits free text into raw address components.
pub trait ComponentParser: Debug {
    fn parse_components(&self, input: &str) -> Result<PostalComponents, TaggingError>;
}

/// A normalized address with the locality read from the same tagging pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAddress {
    pub text: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug)]
pub struct AddressNormalizer {
    parser: Box<dyn ComponentParser>,
}

impl AddressNormalizer {
    pub fn new(parser: Box<dyn ComponentParser>) -> Self {
        Self { parser }
    }

    /// Normalizer backed by the libpostal models.
    pub fn postal() -> Result<Self, PostalError> {
        Ok(Self::new(Box::new(PostalParser::new()?)))
    }

    pub fn tag(&self, address: &str) -> Result<TaggedAddress, TaggingError> {
        if address.trim().is_empty() {
            return Ok(TaggedAddress::default());
        }
        let parsed = self.parser.parse_components(address)?;
        label_components(address, &parsed)
    }

    /// Normalizes a free-text address into `number, street, suffix, place, state, zip`,
    /// omitting the components that are absent.
    ///
    /// The text is returned untouched, with no city or state, when tagging
    /// fails or yields none of the canonical components.
    pub fn normalize(&self, address: &str) -> NormalizedAddress {
        let passthrough = || NormalizedAddress {
            text: address.to_string(),
            city: None,
            state: None,
        };

        match self.tag(address) {
            Ok(tagged) => {
                let parts: Vec<&str> = CANONICAL_ORDER
                    .iter()
                    .filter_map(|label| tagged.get(*label))
                    .collect();
                if parts.is_empty() {
                    return passthrough();
                }
                NormalizedAddress {
                    text: parts.join(", "),
                    city: tagged.get(AddressLabel::PlaceName).map(str::to_string),
                    state: tagged.get(AddressLabel::StateName).map(str::to_string),
                }
            }
            Err(err) => {
                warn!(%address, error = %err, "failed to parse address, using original");
                passthrough()
            }
        }
    }

    pub fn parse(&self, address: &str) -> String {
        self.normalize(address).text
    }

    pub fn city(&self, address: &str) -> Option<String> {
        self.component(address, AddressLabel::PlaceName)
    }

    pub fn state(&self, address: &str) -> Option<String> {
        self.component(address, AddressLabel::StateName)
    }

    fn component(&self, address: &str, label: AddressLabel) -> Option<String> {
        match self.tag(address) {
            Ok(tagged) => tagged.get(label).map(str::to_string),
            Err(err) => {
                debug!(%address, %label, error = %err, "address component unavailable");
                None
            }
        }
    }
}

/// Prefixes `name` onto addresses that only name a locality.
///
/// A normalized address with three or fewer comma-separated parts carries no
/// street line, so the organization name is kept in front of it.
pub fn apply_short_address_policy(name: &str, normalized: &str) -> String {
    if !normalized.is_empty() && normalized.split(',').count() <= 3 {
        format!("{name}, {normalized}")
    } else {
        normalized.to_string()
    }
}
