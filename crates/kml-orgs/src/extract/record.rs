use serde::Serialize;

use crate::export::Row;

/// Category used when a placemark sits outside any named folder.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// One organization assembled from a placemark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationRecord {
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub website: String,
    pub phone: Option<String>,
    pub category: String,
    pub source_file: String,
}

impl OrganizationRecord {
    /// Column order shared by the converter and merged headers.
    pub fn to_row(&self) -> Row {
        vec![
            self.name.clone(),
            self.address.clone(),
            self.city.clone().unwrap_or_default(),
            self.state.clone().unwrap_or_default(),
            self.website.clone(),
            self.phone.clone().unwrap_or_default(),
            self.category.clone(),
            self.source_file.clone(),
        ]
    }
}

/// Why a placemark produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoAddress,
    MissingState,
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::NoAddress => "no address found",
            SkipReason::MissingState => "no state resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPlacemark {
    /// 1-based position among the document's placemarks.
    pub index: usize,
    pub name: String,
    pub reason: SkipReason,
}

/// Result of one extraction pass over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub records: Vec<OrganizationRecord>,
    pub skipped: Vec<SkippedPlacemark>,
}

impl ExtractionReport {
    pub fn rows(&self) -> Vec<Row> {
        self.records.iter().map(OrganizationRecord::to_row).collect()
    }

    pub fn total(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}
