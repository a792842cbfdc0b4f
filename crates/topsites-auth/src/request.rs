//! The request descriptor for a `TopSites` call.

use std::fmt;
use std::str::FromStr;

use typed_builder::TypedBuilder;

use crate::error::AuthError;

/// Selects which subset of fields the service populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseGroup {
    /// Ranked sites for a country (or globally).
    #[default]
    Country,
    /// Ranked sites for a city.
    City,
    /// The countries the service can rank.
    ListCountries,
    /// The cities the service can rank.
    ListCities,
}

impl ResponseGroup {
    /// Every response group, in the service's documented order.
    pub const ALL: [Self; 4] = [
        Self::Country,
        Self::City,
        Self::ListCountries,
        Self::ListCities,
    ];

    /// Code sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::City => "City",
            Self::ListCountries => "ListCountries",
            Self::ListCities => "ListCities",
        }
    }

    /// Name suitable for display.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::City => "City",
            Self::ListCountries => "List countries",
            Self::ListCities => "List cities",
        }
    }
}

impl fmt::Display for ResponseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseGroup {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| AuthError::UnknownResponseGroup(s.to_owned()))
    }
}

/// Parameters of one `TopSites` call.
///
/// Built once per call and consumed by the signer.
///
/// # Examples
///
/// ```
/// use topsites_auth::{ResponseGroup, TopSitesRequest};
///
/// let request = TopSitesRequest::builder()
///     .country_code("US")
///     .start(1)
///     .count(100)
///     .build();
/// assert_eq!(request.response_group, ResponseGroup::Country);
/// assert!(request.city_code.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, TypedBuilder)]
pub struct TopSitesRequest {
    /// Country to rank in. Omitted for a global list.
    #[builder(default, setter(into, strip_option))]
    pub country_code: Option<String>,

    /// City to rank in.
    #[builder(default, setter(into, strip_option))]
    pub city_code: Option<String>,

    /// First rank to return; the service starts at 1 when absent.
    #[builder(default, setter(strip_option))]
    pub start: Option<u32>,

    /// Number of sites to return; the service caps this at 100.
    #[builder(default, setter(strip_option))]
    pub count: Option<u32>,

    /// Response group selector.
    #[builder(default)]
    pub response_group: ResponseGroup,
}
