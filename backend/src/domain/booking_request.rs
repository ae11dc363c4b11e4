//! Booking requests and their pending → confirmed lifecycle.
//!
//! A request is created `pending` with no provider. Confirmation is the only
//! transition and always assigns a provider, so a confirmed request without a
//! provider cannot be constructed.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest accepted request title, in characters.
pub const TITLE_MAX: usize = 120;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Surrogate key of a `requests` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingRequestId(i64);

impl BookingRequestId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Confirmed,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = BookingRequestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            other => Err(BookingRequestValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Validation failures for booking request input and stored rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRequestValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("date must be a calendar date in YYYY-MM-DD form")]
    InvalidDate,
    #[error("budget must not be negative")]
    NegativeBudget,
    #[error("requester name must not be empty")]
    EmptyRequester,
    #[error("unknown request status: {0}")]
    UnknownStatus(String),
    #[error("a confirmed request must name its provider")]
    ConfirmedWithoutProvider,
}

/// Raw field set of a booking request, as read from storage or the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequestRecord {
    pub id: BookingRequestId,
    pub title: String,
    pub category: String,
    pub date: NaiveDate,
    pub budget: i64,
    pub status: RequestStatus,
    pub user_name: String,
    pub provider_name: Option<String>,
}

/// Booking request read model.
///
/// ## Invariants
/// - `status == Confirmed` implies `provider_name` is present.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use service_finder::domain::{
///     BookingRequest, BookingRequestId, BookingRequestRecord, RequestStatus,
/// };
///
/// let record = BookingRequestRecord {
///     id: BookingRequestId::new(1),
///     title: "Brake Repair".into(),
///     category: "Automotive".into(),
///     date: NaiveDate::from_ymd_opt(2025, 2, 10).expect("valid date"),
///     budget: 150,
///     status: RequestStatus::Confirmed,
///     user_name: "John Doe".into(),
///     provider_name: None,
/// };
/// assert!(BookingRequest::try_from(record).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "BookingRequestRecord")]
pub struct BookingRequest {
    #[schema(value_type = i64)]
    id: BookingRequestId,
    title: String,
    category: String,
    #[schema(value_type = String, format = Date, example = "2025-02-10")]
    date: NaiveDate,
    budget: i64,
    status: RequestStatus,
    user_name: String,
    provider_name: Option<String>,
}

impl TryFrom<BookingRequestRecord> for BookingRequest {
    type Error = BookingRequestValidationError;

    fn try_from(record: BookingRequestRecord) -> Result<Self, Self::Error> {
        let BookingRequestRecord {
            id,
            title,
            category,
            date,
            budget,
            status,
            user_name,
            provider_name,
        } = record;

        if status == RequestStatus::Confirmed && provider_name.is_none() {
            return Err(BookingRequestValidationError::ConfirmedWithoutProvider);
        }
        Ok(Self {
            id,
            title,
            category,
            date,
            budget,
            status,
            user_name,
            provider_name,
        })
    }
}

impl BookingRequest {
    pub fn id(&self) -> BookingRequestId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Name of the account that posted the request.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Name of the confirming provider; `None` while pending.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider_name.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Validated input for creating a booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookingRequest {
    title: String,
    category: String,
    date: NaiveDate,
    budget: i64,
    requester: String,
}

impl NewBookingRequest {
    /// Trim and validate raw create input.
    ///
    /// # Examples
    /// ```
    /// use service_finder::domain::{BookingRequestValidationError, NewBookingRequest};
    ///
    /// let ok = NewBookingRequest::try_new(" Fix sink ", "Plumbing", "2025-03-01", 80, "John Doe");
    /// assert_eq!(ok.expect("valid").title(), "Fix sink");
    ///
    /// let err = NewBookingRequest::try_new("Fix sink", "Plumbing", "03/01/2025", 80, "John Doe");
    /// assert_eq!(err, Err(BookingRequestValidationError::InvalidDate));
    /// ```
    pub fn try_new(
        title: &str,
        category: &str,
        date: &str,
        budget: i64,
        requester: &str,
    ) -> Result<Self, BookingRequestValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BookingRequestValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(BookingRequestValidationError::TitleTooLong { max: TITLE_MAX });
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(BookingRequestValidationError::EmptyCategory);
        }
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| BookingRequestValidationError::InvalidDate)?;
        if budget < 0 {
            return Err(BookingRequestValidationError::NegativeBudget);
        }
        let requester = requester.trim();
        if requester.is_empty() {
            return Err(BookingRequestValidationError::EmptyRequester);
        }

        Ok(Self {
            title: title.to_owned(),
            category: category.to_owned(),
            date,
            budget,
            requester: requester.to_owned(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Storage form of the date.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn requester(&self) -> &str {
        &self.requester
    }
}

/// Parse a stored `YYYY-MM-DD` date.
pub fn parse_stored_date(raw: &str) -> Result<NaiveDate, BookingRequestValidationError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| BookingRequestValidationError::InvalidDate)
}

/// Which requests a caller may list.
///
/// Requesters see their own requests. Providers see every pending request
/// plus the ones they confirmed. Anyone else sees everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestScope {
    Requester(String),
    Provider(String),
    All,
}

impl RequestScope {
    /// Build the scope from the optional `role` and `name` query values.
    ///
    /// A recognised role without a name scopes to the empty name, which no
    /// stored request carries.
    ///
    /// # Examples
    /// ```
    /// use service_finder::domain::RequestScope;
    ///
    /// assert_eq!(
    ///     RequestScope::from_role(Some("user"), Some("John Doe")),
    ///     RequestScope::Requester("John Doe".into()),
    /// );
    /// assert_eq!(RequestScope::from_role(Some("admin"), Some("x")), RequestScope::All);
    /// assert_eq!(RequestScope::from_role(None, None), RequestScope::All);
    /// ```
    pub fn from_role(role: Option<&str>, name: Option<&str>) -> Self {
        let name = name.unwrap_or_default().to_owned();
        match role {
            Some("user") => Self::Requester(name),
            Some("provider") => Self::Provider(name),
            _ => Self::All,
        }
    }

    /// Whether `request` is visible under this scope.
    pub fn admits(&self, request: &BookingRequest) -> bool {
        match self {
            Self::Requester(name) => request.user_name() == name,
            Self::Provider(name) => {
                request.is_pending() || request.provider_name() == Some(name.as_str())
            }
            Self::All => true,
        }
    }
}
