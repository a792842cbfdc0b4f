//! Canonical query string construction.
//!
//! The service recomputes the signature over the query string exactly as it
//! was sent, so parameter order is part of the protocol:
//!
//! ```text
//! AWSAccessKeyId, Action, Count, [CityCode], [CountryCode], ResponseGroup,
//! SignatureMethod, SignatureVersion, Start, Timestamp
//! ```
//!
//! `Count` and `Start` are always present (with an empty value when unset).
//! `CityCode` and `CountryCode` are left out when unset or empty.

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::request::TopSitesRequest;

/// The only action this client issues.
pub const ACTION: &str = "TopSites";

/// Signature method advertised in the query string.
pub const SIGNATURE_METHOD: &str = "HmacSHA256";

/// Signature version advertised in the query string.
pub const SIGNATURE_VERSION: &str = "2";

/// Millisecond-precision UTC timestamp, e.g. `2026-10-19T08:30:00.000Z`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Everything except RFC 3986 unreserved characters is percent-encoded.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a query value.
#[must_use]
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

/// Format a timestamp the way the service expects it.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// The ordered, unencoded `(name, value)` pairs of a request.
#[must_use]
pub fn query_params(
    access_key: &str,
    request: &TopSitesRequest,
    timestamp: &DateTime<Utc>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(10);
    params.push(("AWSAccessKeyId", access_key.to_owned()));
    params.push(("Action", ACTION.to_owned()));
    params.push(("Count", optional_number(request.count)));
    if let Some(city) = non_empty(request.city_code.as_deref()) {
        params.push(("CityCode", city.to_owned()));
    }
    if let Some(country) = non_empty(request.country_code.as_deref()) {
        params.push(("CountryCode", country.to_owned()));
    }
    params.push(("ResponseGroup", request.response_group.as_str().to_owned()));
    params.push(("SignatureMethod", SIGNATURE_METHOD.to_owned()));
    params.push(("SignatureVersion", SIGNATURE_VERSION.to_owned()));
    params.push(("Start", optional_number(request.start)));
    params.push(("Timestamp", format_timestamp(timestamp)));
    params
}

/// Build the canonical query string (without the signature).
#[must_use]
pub fn canonical_query(
    access_key: &str,
    request: &TopSitesRequest,
    timestamp: &DateTime<Utc>,
) -> String {
    query_params(access_key, request, timestamp)
        .iter()
        .map(|(name, value)| format!("{name}={}", uri_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn optional_number(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::request::ResponseGroup;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 5).unwrap()
    }

    #[test]
    fn test_should_format_timestamp_with_milliseconds() {
        assert_eq!(format_timestamp(&timestamp()), "2026-10-19T08:30:05.000Z");
    }

    #[test]
    fn test_should_encode_reserved_characters() {
        assert_eq!(uri_encode("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(uri_encode("a b/c:d+e=f"), "a%20b%2Fc%3Ad%2Be%3Df");
    }

    #[test]
    fn test_should_build_query_in_fixed_order() {
        let request = TopSitesRequest::builder()
            .country_code("US")
            .city_code("NYC")
            .start(1)
            .count(100)
            .build();
        let names: Vec<&str> = query_params("AKID", &request, &timestamp())
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            [
                "AWSAccessKeyId",
                "Action",
                "Count",
                "CityCode",
                "CountryCode",
                "ResponseGroup",
                "SignatureMethod",
                "SignatureVersion",
                "Start",
                "Timestamp",
            ]
        );
    }

    #[test]
    fn test_should_keep_empty_count_and_start_but_omit_codes() {
        let request = TopSitesRequest::builder()
            .country_code("")
            .response_group(ResponseGroup::ListCountries)
            .build();
        assert_eq!(
            canonical_query("AKID", &request, &timestamp()),
            "AWSAccessKeyId=AKID&Action=TopSites&Count=&ResponseGroup=ListCountries\
             &SignatureMethod=HmacSHA256&SignatureVersion=2&Start=\
             &Timestamp=2026-10-19T08%3A30%3A05.000Z"
        );
    }
}
