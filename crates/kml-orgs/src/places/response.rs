use serde::Deserialize;

use super::PlaceDetails;

const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    status: String,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
}

fn first_candidate(body: &str) -> Result<Option<Candidate>, serde_json::Error> {
    let response: FindPlaceResponse = serde_json::from_str(body)?;
    if response.status != STATUS_OK {
        return Ok(None);
    }
    Ok(response.candidates.into_iter().next())
}

pub(crate) fn candidate_address(body: &str) -> Result<Option<String>, serde_json::Error> {
    Ok(first_candidate(body)?.and_then(|candidate| non_blank(candidate.formatted_address)))
}

pub(crate) fn candidate_place_id(body: &str) -> Result<Option<String>, serde_json::Error> {
    Ok(first_candidate(body)?.and_then(|candidate| non_blank(candidate.place_id)))
}

pub(crate) fn place_details(body: &str) -> Result<PlaceDetails, serde_json::Error> {
    let response: DetailsResponse = serde_json::from_str(body)?;
    if response.status != STATUS_OK {
        return Ok(PlaceDetails::default());
    }

    Ok(response
        .result
        .map(|result| PlaceDetails {
            address: non_blank(result.formatted_address),
            phone: non_blank(result.formatted_phone_number),
        })
        .unwrap_or_default())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_address_reads_first_candidate() {
        let body = r#"{"status":"OK","candidates":[
            {"formatted_address":"123 Main St, Springfield, IL 62701, USA"},
            {"formatted_address":"9 Elm St, Springfield, IL 62702, USA"}]}"#;
        assert_eq!(
            candidate_address(body).expect("decodes").as_deref(),
            Some("123 Main St, Springfield, IL 62701, USA")
        );
    }

    #[test]
    fn non_ok_status_or_empty_candidates_are_absent() {
        let zero = r#"{"status":"ZERO_RESULTS","candidates":[]}"#;
        assert_eq!(candidate_address(zero).expect("decodes"), None);

        let denied = r#"{"status":"REQUEST_DENIED","error_message":"bad key"}"#;
        assert_eq!(candidate_place_id(denied).expect("decodes"), None);

        let empty = r#"{"status":"OK","candidates":[]}"#;
        assert_eq!(candidate_place_id(empty).expect("decodes"), None);
    }

    #[test]
    fn details_carry_address_and_phone() {
        let body = r#"{"status":"OK","result":{
            "formatted_address":"1 Infinite Loop, Cupertino, CA 95014, USA",
            "formatted_phone_number":"(408) 996-1010"}}"#;
        let details = place_details(body).expect("decodes");
        assert_eq!(
            details.address.as_deref(),
            Some("1 Infinite Loop, Cupertino, CA 95014, USA")
        );
        assert_eq!(details.phone.as_deref(), Some("(408) 996-1010"));
    }

    #[test]
    fn failed_details_lookup_clears_both_fields() {
        let body = r#"{"status":"NOT_FOUND"}"#;
        assert_eq!(place_details(body).expect("decodes"), PlaceDetails::default());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(candidate_address("<html>").is_err());
    }
}
