use std::collections::HashMap;

use super::{AddressNormalizer, ComponentParser, PostalComponents, TaggingError};

/// Parser double answering from a fixed table; unknown text has no components.
#[derive(Debug, Default)]
pub(crate) struct FixedParser {
    entries: HashMap<String, PostalComponents>,
}

impl FixedParser {
    /// Registers the lowercase components a statistical parser reports for `input`.
    pub(crate) fn with(
        mut self,
        input: &str,
        [house_number, road, city, state, postcode]: [&str; 5],
    ) -> Self {
        let field = |value: &str| (!value.is_empty()).then(|| value.to_string());
        let components = PostalComponents {
            house_number: field(house_number),
            road: field(road),
            city: field(city),
            state: field(state),
            postcode: field(postcode),
            ..PostalComponents::default()
        };
        self.entries.insert(input.to_string(), components);
        self
    }

    pub(crate) fn with_components(mut self, input: &str, components: PostalComponents) -> Self {
        self.entries.insert(input.to_string(), components);
        self
    }
}

impl ComponentParser for FixedParser {
    fn parse_components(&self, input: &str) -> Result<PostalComponents, TaggingError> {
        Ok(self.entries.get(input.trim()).cloned().unwrap_or_default())
    }
}

/// Normalizer over the addresses used throughout the crate's tests.
pub(crate) fn sample_normalizer() -> AddressNormalizer {
    let with_country = |components: [&str; 5]| {
        let [house_number, road, city, state, postcode] = components.map(str::to_string);
        let field = |value: String| (!value.is_empty()).then_some(value);
        PostalComponents {
            house_number: field(house_number),
            road: field(road),
            city: field(city),
            state: field(state),
            postcode: field(postcode),
            country: Some("usa".to_string()),
            ..PostalComponents::default()
        }
    };

    let parser = FixedParser::default()
        .with(
            "123 Main St, Springfield, IL 62701",
            ["123", "main st", "springfield", "il", "62701"],
        )
        .with(
            "123 Main St, Springfield, IL 62701, Chicago, IL 60601",
            ["123", "main st", "chicago", "il", "60601"],
        )
        .with(
            "9 Elm Ave, Austin, TX 78701",
            ["9", "elm ave", "austin", "tx", "78701"],
        )
        .with("Brooklyn, NY 11201", ["", "", "brooklyn", "ny", "11201"])
        .with_components(
            "Brooklyn, NY 11201, USA",
            with_country(["", "", "brooklyn", "ny", "11201"]),
        )
        .with_components(
            "1 Infinite Loop, Cupertino, CA 95014, USA",
            with_country(["1", "infinite loop", "cupertino", "ca", "95014"]),
        )
        .with(
            "350 Fifth Avenue, New York, NY 10118",
            ["350", "fifth avenue", "new york", "ny", "10118"],
        )
        .with(
            "100 Washington St, Boston, MA 02108",
            ["100", "washington st", "boston", "ma", "02108"],
        )
        .with(
            "1600 Pennsylvania Ave NW, Washington, DC 20500",
            ["1600", "pennsylvania ave nw", "washington", "dc", "20500"],
        )
        .with(
            "250 Delaware Ave, Buffalo, NY 14202",
            ["250", "delaware ave", "buffalo", "ny", "14202"],
        )
        .with_components(
            "100 W 42nd St Ste 5, New York, NY 10036",
            PostalComponents {
                house_number: Some("100".to_string()),
                road: Some("w 42nd st".to_string()),
                unit: Some("ste 5".to_string()),
                city: Some("new york".to_string()),
                state: Some("ny".to_string()),
                postcode: Some("10036".to_string()),
                country: None,
            },
        );

    AddressNormalizer::new(Box::new(parser))
}
