/// Where a placemark's organization name is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// The placemark's `<name>` element; a missing element yields an empty name.
    Element,
    /// A named extended data field; a missing field aborts the extraction.
    DataField(&'static str),
}

/// Which places lookup fills in a missing address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Address only.
    AddressOnly,
    /// Place id followed by a details call, which may also supply a phone.
    Details,
}

/// Field mapping and emission rules for one family of KML exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPolicy {
    pub label: &'static str,
    pub name_source: NameSource,
    pub website_field: &'static str,
    pub phone_field: Option<&'static str>,
    pub lookup_mode: LookupMode,
    /// Drop placemarks whose address yields no state.
    pub require_state: bool,
    pub output_file_name: &'static str,
}

impl ExtractionPolicy {
    /// Circular NYC directory export.
    pub fn circular() -> Self {
        Self {
            label: "Circular",
            name_source: NameSource::Element,
            website_field: "Website",
            phone_field: Some("Phone"),
            lookup_mode: LookupMode::AddressOnly,
            require_state: false,
            output_file_name: "circular_orgs.csv",
        }
    }

    /// ReUse organizations map export.
    pub fn reuse() -> Self {
        Self {
            label: "ReUse",
            name_source: NameSource::DataField("Org"),
            website_field: "Link",
            phone_field: Some("Phone"),
            lookup_mode: LookupMode::Details,
            require_state: true,
            output_file_name: "reuse_orgs.csv",
        }
    }
}
