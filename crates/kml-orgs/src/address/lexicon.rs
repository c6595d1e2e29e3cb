use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

static STATE_LOOKUP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
static ADDRESS_NUMBER: OnceLock<Regex> = OnceLock::new();
static ZIP_CODE: OnceLock<Regex> = OnceLock::new();

const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

const STREET_SUFFIXES: &[&str] = &[
    "alley", "aly", "ave", "av", "avenue", "blvd", "boulevard", "bridge", "brg", "cir",
    "circle", "ct", "court", "cres", "crescent", "dr", "drive", "expressway", "expy", "hwy",
    "highway", "lane", "ln", "loop", "parkway", "pkwy", "pl", "place", "plaza", "plz", "rd",
    "road", "row", "sq", "square", "st", "street", "ter", "terrace", "tpke", "trail", "trl",
    "turnpike", "walk", "way",
];

const DIRECTIONALS: &[&str] = &[
    "n", "s", "e", "w", "ne", "nw", "se", "sw", "north", "south", "east", "west", "northeast",
    "northwest", "southeast", "southwest",
];

const OCCUPANCY_TYPES: &[&str] = &[
    "apt", "apartment", "bldg", "building", "fl", "floor", "rm", "room", "ste", "suite", "unit",
];

fn comparable(token: &str) -> String {
    token.trim_end_matches('.').to_ascii_lowercase()
}

fn state_lookup() -> &'static HashMap<String, &'static str> {
    STATE_LOOKUP.get_or_init(|| {
        let mut map = HashMap::new();
        for (abbreviation, full) in STATES {
            map.insert(abbreviation.to_ascii_lowercase(), *full);
            map.insert(full.to_ascii_lowercase(), *full);
        }
        map
    })
}

/// Resolves a labelled state value (`IL`, `d.c.`, `new york`) to its full name.
pub(crate) fn canonical_state(value: &str) -> Option<&'static str> {
    let key = value
        .split_whitespace()
        .map(|word| word.replace('.', "").to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    state_lookup().get(&key).copied()
}

pub(crate) fn is_street_suffix(token: &str) -> bool {
    STREET_SUFFIXES.contains(&comparable(token).as_str())
}

pub(crate) fn is_directional(token: &str) -> bool {
    DIRECTIONALS.contains(&comparable(token).as_str())
}

pub(crate) fn is_occupancy_type(token: &str) -> bool {
    OCCUPANCY_TYPES.contains(&comparable(token).as_str())
}

pub(crate) fn is_address_number(token: &str) -> bool {
    ADDRESS_NUMBER
        .get_or_init(|| Regex::new(r"^\d+(-\d+)?[A-Za-z]?$").expect("address number pattern"))
        .is_match(token)
}

pub(crate) fn is_zip_code(token: &str) -> bool {
    ZIP_CODE
        .get_or_init(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip code pattern"))
        .is_match(token)
}
