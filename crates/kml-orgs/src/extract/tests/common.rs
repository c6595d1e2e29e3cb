use std::collections::HashMap;
use std::sync::Mutex;

pub(super) use crate::address::testing::sample_normalizer;
use crate::places::{PlaceDetails, PlaceLookup};

/// Lookup double answering from fixed tables and recording every query.
#[derive(Debug, Default)]
pub(super) struct RecordingLookup {
    addresses: HashMap<String, String>,
    details: HashMap<String, PlaceDetails>,
    calls: Mutex<Vec<String>>,
}

impl RecordingLookup {
    pub(super) fn with_address(mut self, name: &str, address: &str) -> Self {
        self.addresses.insert(name.to_string(), address.to_string());
        self
    }

    pub(super) fn with_details(mut self, name: &str, address: &str, phone: Option<&str>) -> Self {
        self.details.insert(
            name.to_string(),
            PlaceDetails {
                address: Some(address.to_string()),
                phone: phone.map(str::to_string),
            },
        );
        self
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

impl PlaceLookup for RecordingLookup {
    fn resolve_address(&self, business_name: &str) -> Option<String> {
        self.record(format!("address:{business_name}"));
        self.addresses.get(business_name).cloned()
    }

    fn resolve_details(&self, business_name: &str) -> PlaceDetails {
        self.record(format!("details:{business_name}"));
        self.details.get(business_name).cloned().unwrap_or_default()
    }
}

/// Wraps placemark fragments in a namespaced KML document.
pub(super) fn kml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Test export</name>
    {body}
  </Document>
</kml>"#
    )
}

pub(super) fn folder(name: &str, placemarks: &[String]) -> String {
    format!("<Folder><name>{name}</name>{}</Folder>", placemarks.concat())
}

/// Builds a placemark; `fields` become `ExtendedData/Data` entries.
pub(super) fn placemark(name: Option<&str>, address: Option<&str>, fields: &[(&str, &str)]) -> String {
    let name = name
        .map(|value| format!("<name>{value}</name>"))
        .unwrap_or_default();
    let address = address
        .map(|value| format!("<address>{value}</address>"))
        .unwrap_or_default();
    let data = fields
        .iter()
        .map(|(key, value)| format!(r#"<Data name="{key}"><value>{value}</value></Data>"#))
        .collect::<String>();

    format!(
        "<Placemark>{name}{address}<ExtendedData>{data}</ExtendedData><Point><coordinates>-73.98,40.75,0</coordinates></Point></Placemark>"
    )
}
