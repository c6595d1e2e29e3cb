use std::fmt;

use super::lexicon;
use super::PostalComponents;

/// Component labels assigned to the words of a US street address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressLabel {
    AddressNumber,
    StreetNamePreDirectional,
    StreetName,
    StreetNamePostType,
    StreetNamePostDirectional,
    OccupancyType,
    OccupancyIdentifier,
    PlaceName,
    StateName,
    ZipCode,
    CountryName,
}

impl AddressLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressLabel::AddressNumber => "AddressNumber",
            AddressLabel::StreetNamePreDirectional => "StreetNamePreDirectional",
            AddressLabel::StreetName => "StreetName",
            AddressLabel::StreetNamePostType => "StreetNamePostType",
            AddressLabel::StreetNamePostDirectional => "StreetNamePostDirectional",
            AddressLabel::OccupancyType => "OccupancyType",
            AddressLabel::OccupancyIdentifier => "OccupancyIdentifier",
            AddressLabel::PlaceName => "PlaceName",
            AddressLabel::StateName => "StateName",
            AddressLabel::ZipCode => "ZipCode",
            AddressLabel::CountryName => "CountryName",
        }
    }
}

impl fmt::Display for AddressLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labelled address components in street-to-country order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedAddress {
    components: Vec<(AddressLabel, String)>,
}

impl TaggedAddress {
    pub fn get(&self, label: AddressLabel) -> Option<&str> {
        self.components
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn components(&self) -> &[(AddressLabel, String)] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    fn push(&mut self, label: AddressLabel, words: &[&str]) {
        if !words.is_empty() {
            self.components.push((label, words.join(" ")));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaggingError {
    #[error("label {label} matches more than one part of '{input}'")]
    RepeatedLabel { label: AddressLabel, input: String },
    #[error("address parser rejected '{input}': {message}")]
    Parser { input: String, message: String },
}

/// Maps parser output for `input` onto [`AddressLabel`]s.
///
/// Values keep the spelling they have in `input`; the state is expanded to
/// its full name. The road splits into directionals, name and suffix, and the
/// unit into occupancy type and identifier. An input carrying two ZIP codes
/// or two numbered street lines fails with [`TaggingError::RepeatedLabel`].
pub fn label_components(
    input: &str,
    parsed: &PostalComponents,
) -> Result<TaggedAddress, TaggingError> {
    if let Some(label) = repeated_label(input) {
        return Err(TaggingError::RepeatedLabel {
            label,
            input: input.trim().to_string(),
        });
    }

    let restore = |value: &Option<String>| {
        value
            .as_deref()
            .map(|value| original_case(input, value))
    };
    let house_number = restore(&parsed.house_number);
    let road = restore(&parsed.road);
    let unit = restore(&parsed.unit);
    let city = restore(&parsed.city);
    let state = restore(&parsed.state).map(|state| match lexicon::canonical_state(&state) {
        Some(full) => full.to_string(),
        None => state,
    });
    let postcode = restore(&parsed.postcode);
    let country = restore(&parsed.country);

    let mut tagged = TaggedAddress::default();
    tagged.push(AddressLabel::AddressNumber, &words(&house_number));

    let road_words = words(&road);
    let street = split_road(&road_words);
    tagged.push(AddressLabel::StreetNamePreDirectional, street.pre_directional);
    tagged.push(AddressLabel::StreetName, street.name);
    tagged.push(AddressLabel::StreetNamePostType, street.post_type);
    tagged.push(AddressLabel::StreetNamePostDirectional, street.post_directional);

    let unit_words = words(&unit);
    match unit_words.split_first() {
        Some((marker, rest)) if lexicon::is_occupancy_type(marker) => {
            tagged.push(AddressLabel::OccupancyType, &[*marker]);
            tagged.push(AddressLabel::OccupancyIdentifier, rest);
        }
        _ => tagged.push(AddressLabel::OccupancyIdentifier, &unit_words),
    }

    tagged.push(AddressLabel::PlaceName, &words(&city));
    tagged.push(AddressLabel::StateName, &words(&state));
    tagged.push(AddressLabel::ZipCode, &words(&postcode));
    tagged.push(AddressLabel::CountryName, &words(&country));
    Ok(tagged)
}

fn words(value: &Option<String>) -> Vec<&str> {
    value
        .as_deref()
        .map(|value| value.split_whitespace().collect())
        .unwrap_or_default()
}

fn repeated_label(input: &str) -> Option<AddressLabel> {
    let zip_codes = input
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|word| lexicon::is_zip_code(word))
        .count();
    if zip_codes > 1 {
        return Some(AddressLabel::ZipCode);
    }

    let street_lines = input
        .split(',')
        .filter(|segment| {
            let mut segment_words = segment.split_whitespace();
            matches!(
                (segment_words.next(), segment_words.next()),
                (Some(first), Some(second))
                    if lexicon::is_address_number(first) && !lexicon::is_zip_code(second)
            )
        })
        .count();
    (street_lines > 1).then_some(AddressLabel::AddressNumber)
}

#[derive(Debug, Default)]
struct RoadParts<'a, 'w> {
    pre_directional: &'a [&'w str],
    name: &'a [&'w str],
    post_type: &'a [&'w str],
    post_directional: &'a [&'w str],
}

fn split_road<'a, 'w>(road: &'a [&'w str]) -> RoadParts<'a, 'w> {
    let mut parts = RoadParts::default();
    let mut rest = road;

    if rest.len() > 2 && lexicon::is_directional(rest[rest.len() - 1]) {
        let (head, tail) = rest.split_at(rest.len() - 1);
        parts.post_directional = tail;
        rest = head;
    }
    if rest.len() > 1 && lexicon::is_street_suffix(rest[rest.len() - 1]) {
        let (head, tail) = rest.split_at(rest.len() - 1);
        parts.post_type = tail;
        rest = head;
    }
    if rest.len() > 1 && lexicon::is_directional(rest[0]) {
        let (head, tail) = rest.split_at(1);
        parts.pre_directional = head;
        rest = tail;
    }
    parts.name = rest;
    parts
}

/// Finds `value` as a whole-word run in `input`, ignoring ASCII case, and
/// returns the input's own spelling of it.
fn original_case(input: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let haystack = input.to_ascii_lowercase();
    let needle = value.to_ascii_lowercase();
    let is_word_char = |ch: Option<char>| ch.is_some_and(char::is_alphanumeric);

    haystack
        .match_indices(&needle)
        .find(|(start, _)| {
            let end = start + needle.len();
            !is_word_char(haystack[..*start].chars().next_back())
                && !is_word_char(haystack[end..].chars().next())
        })
        .map(|(start, _)| input[start..start + needle.len()].to_string())
        .unwrap_or_else(|| value.to_string())
}
