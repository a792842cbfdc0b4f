//! Decoders for the `TopSites` success document.
//!
//! Every element lives under the `aws` prefix:
//!
//! ```text
//! TopSitesResponse
//! └── Response
//!     ├── OperationRequest/RequestId
//!     ├── TopSitesResult/Alexa/TopSites
//!     │   ├── List: CountryName, CountryCode, TotalSites, Sites/Site*
//!     │   │   Site: DataUrl, Country{Rank, Reach/PerMillion, PageViews}, Global/Rank
//!     │   └── Cities/City*: Name, Code, TotalSites, PageViews, Users
//!     └── ResponseStatus/StatusCode
//! ```
//!
//! Children are looked up by qualified name, so their position in the
//! source is irrelevant except inside the repeated collections.

use serde::Serialize;

use crate::atom::{Atom, atom_list, decimal_text, integer_text, numeric_atom, text_atom};
use crate::element::{Element, QualifiedName};
use crate::error::AtomError;

/// Namespace prefix used throughout the success document.
pub const AWS_PREFIX: Option<&str> = Some("aws");

const fn aws(local_name: &'static str) -> QualifiedName<'static> {
    QualifiedName::new(AWS_PREFIX, local_name)
}

text_atom!(
    /// Identifier the service assigned to the request.
    RequestId,
    AWS_PREFIX,
    "RequestId"
);
text_atom!(
    /// Overall outcome, `Success` for a served request.
    StatusCode,
    AWS_PREFIX,
    "StatusCode"
);
text_atom!(
    /// Display name of the listed country.
    CountryName,
    AWS_PREFIX,
    "CountryName"
);
text_atom!(
    /// Code of the listed country.
    CountryCode,
    AWS_PREFIX,
    "CountryCode"
);
text_atom!(
    /// Site host name.
    DataUrl,
    AWS_PREFIX,
    "DataUrl"
);
text_atom!(
    /// City name.
    Name,
    AWS_PREFIX,
    "Name"
);
text_atom!(
    /// City code.
    Code,
    AWS_PREFIX,
    "Code"
);
numeric_atom!(
    /// Rank of a site, 1 being the most visited.
    Rank,
    AWS_PREFIX,
    "Rank",
    u64,
    integer_text
);
numeric_atom!(
    /// Number of ranked sites available.
    TotalSites,
    AWS_PREFIX,
    "TotalSites",
    u64,
    integer_text
);
numeric_atom!(
    /// A per-million ratio.
    PerMillion,
    AWS_PREFIX,
    "PerMillion",
    rust_decimal::Decimal,
    decimal_text
);
numeric_atom!(
    /// Page views per user.
    PerUser,
    AWS_PREFIX,
    "PerUser",
    rust_decimal::Decimal,
    decimal_text
);
numeric_atom!(
    /// Share of users.
    Users,
    AWS_PREFIX,
    "Users",
    rust_decimal::Decimal,
    decimal_text
);

atom_list!(
    /// Ranked sites, in the order the service listed them.
    Sites,
    AWS_PREFIX,
    "Sites",
    Site
);
atom_list!(
    /// Cities, in the order the service listed them.
    Cities,
    AWS_PREFIX,
    "Cities",
    City
);

/// Root of a successful `TopSites` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopSitesResponse {
    response: Response,
}

impl TopSitesResponse {
    /// The response body. Always present in a decoded document.
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }
}

impl Atom for TopSitesResponse {
    const NAME: QualifiedName<'static> = aws("TopSitesResponse");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            response: Response::parse_required_child(element)?,
        })
    }
}

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Response {
    operation_request: Option<OperationRequest>,
    top_sites_result: Option<TopSitesResult>,
    response_status: Option<ResponseStatus>,
}

impl Response {
    /// Echo of the request metadata.
    #[must_use]
    pub fn operation_request(&self) -> Option<&OperationRequest> {
        self.operation_request.as_ref()
    }

    /// The ranking data.
    #[must_use]
    pub fn top_sites_result(&self) -> Option<&TopSitesResult> {
        self.top_sites_result.as_ref()
    }

    /// The response status.
    #[must_use]
    pub fn response_status(&self) -> Option<&ResponseStatus> {
        self.response_status.as_ref()
    }
}

impl Atom for Response {
    const NAME: QualifiedName<'static> = aws("Response");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            operation_request: OperationRequest::parse_child(element)?,
            top_sites_result: TopSitesResult::parse_child(element)?,
            response_status: ResponseStatus::parse_child(element)?,
        })
    }
}

/// Request metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationRequest {
    request_id: Option<RequestId>,
}

impl OperationRequest {
    /// The request identifier.
    #[must_use]
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}

impl Atom for OperationRequest {
    const NAME: QualifiedName<'static> = aws("OperationRequest");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            request_id: RequestId::parse_child(element)?,
        })
    }
}

/// Response status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseStatus {
    status_code: Option<StatusCode>,
}

impl ResponseStatus {
    /// The status code.
    #[must_use]
    pub fn status_code(&self) -> Option<&StatusCode> {
        self.status_code.as_ref()
    }
}

impl Atom for ResponseStatus {
    const NAME: QualifiedName<'static> = aws("ResponseStatus");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            status_code: StatusCode::parse_child(element)?,
        })
    }
}

/// Wrapper around the Alexa payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopSitesResult {
    alexa: Option<Alexa>,
}

impl TopSitesResult {
    /// The Alexa payload.
    #[must_use]
    pub fn alexa(&self) -> Option<&Alexa> {
        self.alexa.as_ref()
    }
}

impl Atom for TopSitesResult {
    const NAME: QualifiedName<'static> = aws("TopSitesResult");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            alexa: Alexa::parse_child(element)?,
        })
    }
}

/// The Alexa payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Alexa {
    top_sites: Option<TopSites>,
}

impl Alexa {
    /// The top sites section.
    #[must_use]
    pub fn top_sites(&self) -> Option<&TopSites> {
        self.top_sites.as_ref()
    }
}

impl Atom for Alexa {
    const NAME: QualifiedName<'static> = aws("Alexa");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            top_sites: TopSites::parse_child(element)?,
        })
    }
}

/// Top sites section. Which children appear depends on the response group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopSites {
    list: Option<List>,
    cities: Option<Cities>,
}

impl TopSites {
    /// The ranked list for one country or globally.
    #[must_use]
    pub fn list(&self) -> Option<&List> {
        self.list.as_ref()
    }

    /// City breakdown.
    #[must_use]
    pub fn cities(&self) -> Option<&Cities> {
        self.cities.as_ref()
    }
}

impl Atom for TopSites {
    const NAME: QualifiedName<'static> = aws("TopSites");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            list: List::parse_child(element)?,
            cities: Cities::parse_child(element)?,
        })
    }
}

/// A ranked list of sites.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct List {
    country_name: Option<CountryName>,
    country_code: Option<CountryCode>,
    total_sites: Option<TotalSites>,
    sites: Option<Sites>,
}

impl List {
    /// Country name.
    #[must_use]
    pub fn country_name(&self) -> Option<&CountryName> {
        self.country_name.as_ref()
    }

    /// Country code.
    #[must_use]
    pub fn country_code(&self) -> Option<&CountryCode> {
        self.country_code.as_ref()
    }

    /// Total number of ranked sites.
    #[must_use]
    pub fn total_sites(&self) -> Option<TotalSites> {
        self.total_sites
    }

    /// The sites.
    #[must_use]
    pub fn sites(&self) -> Option<&Sites> {
        self.sites.as_ref()
    }
}

impl Atom for List {
    const NAME: QualifiedName<'static> = aws("List");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            country_name: CountryName::parse_child(element)?,
            country_code: CountryCode::parse_child(element)?,
            total_sites: TotalSites::parse_child(element)?,
            sites: Sites::parse_child(element)?,
        })
    }
}

/// One ranked site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    data_url: Option<DataUrl>,
    country: Option<Country>,
    global: Option<Global>,
}

impl Site {
    /// Host name of the site.
    #[must_use]
    pub fn data_url(&self) -> Option<&DataUrl> {
        self.data_url.as_ref()
    }

    /// Statistics within the requested country.
    #[must_use]
    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    /// Global statistics.
    #[must_use]
    pub fn global(&self) -> Option<&Global> {
        self.global.as_ref()
    }
}

impl Atom for Site {
    const NAME: QualifiedName<'static> = aws("Site");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            data_url: DataUrl::parse_child(element)?,
            country: Country::parse_child(element)?,
            global: Global::parse_child(element)?,
        })
    }
}

/// Per-country statistics of a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    rank: Option<Rank>,
    reach: Option<Reach>,
    page_views: Option<PageViews>,
}

impl Country {
    /// Rank within the country.
    #[must_use]
    pub fn rank(&self) -> Option<Rank> {
        self.rank
    }

    /// Reach within the country.
    #[must_use]
    pub fn reach(&self) -> Option<&Reach> {
        self.reach.as_ref()
    }

    /// Page views within the country.
    #[must_use]
    pub fn page_views(&self) -> Option<&PageViews> {
        self.page_views.as_ref()
    }
}

impl Atom for Country {
    const NAME: QualifiedName<'static> = aws("Country");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            rank: Rank::parse_child(element)?,
            reach: Reach::parse_child(element)?,
            page_views: PageViews::parse_child(element)?,
        })
    }
}

/// Global statistics of a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Global {
    rank: Option<Rank>,
}

impl Global {
    /// Global rank.
    #[must_use]
    pub fn rank(&self) -> Option<Rank> {
        self.rank
    }
}

impl Atom for Global {
    const NAME: QualifiedName<'static> = aws("Global");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            rank: Rank::parse_child(element)?,
        })
    }
}

/// Reach of a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reach {
    per_million: Option<PerMillion>,
}

impl Reach {
    /// Users reached, per million.
    #[must_use]
    pub fn per_million(&self) -> Option<PerMillion> {
        self.per_million
    }
}

impl Atom for Reach {
    const NAME: QualifiedName<'static> = aws("Reach");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            per_million: PerMillion::parse_child(element)?,
        })
    }
}

/// Page view statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageViews {
    per_million: Option<PerMillion>,
    per_user: Option<PerUser>,
}

impl PageViews {
    /// Page views per million.
    #[must_use]
    pub fn per_million(&self) -> Option<PerMillion> {
        self.per_million
    }

    /// Page views per user.
    #[must_use]
    pub fn per_user(&self) -> Option<PerUser> {
        self.per_user
    }
}

impl Atom for PageViews {
    const NAME: QualifiedName<'static> = aws("PageViews");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            per_million: PerMillion::parse_child(element)?,
            per_user: PerUser::parse_child(element)?,
        })
    }
}

/// Statistics for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct City {
    name: Option<Name>,
    code: Option<Code>,
    total_sites: Option<TotalSites>,
    page_views: Option<PageViews>,
    users: Option<Users>,
}

impl City {
    /// City name.
    #[must_use]
    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    /// City code.
    #[must_use]
    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    /// Number of ranked sites in the city.
    #[must_use]
    pub fn total_sites(&self) -> Option<TotalSites> {
        self.total_sites
    }

    /// Page views in the city.
    #[must_use]
    pub fn page_views(&self) -> Option<&PageViews> {
        self.page_views.as_ref()
    }

    /// Share of users in the city.
    #[must_use]
    pub fn users(&self) -> Option<Users> {
        self.users
    }
}

impl Atom for City {
    const NAME: QualifiedName<'static> = aws("City");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            name: Name::parse_child(element)?,
            code: Code::parse_child(element)?,
            total_sites: TotalSites::parse_child(element)?,
            page_views: PageViews::parse_child(element)?,
            users: Users::parse_child(element)?,
        })
    }
}
