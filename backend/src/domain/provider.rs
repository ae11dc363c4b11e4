//! Service provider listings and the provider dashboard read model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::BookingRequest;

/// Dashboard earnings estimate per completed job, in whole currency units.
pub const EARNINGS_PER_JOB: i64 = 45;

/// Surrogate key of a `providers` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(i64);

impl ProviderId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Provider listing as shown in the catalogue.
///
/// `rating` and `jobs` are display data seeded once; they are not
/// recomputed from confirmed requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    #[schema(value_type = i64)]
    pub id: ProviderId,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub rating: f64,
    pub jobs: i64,
    #[serde(rename = "img")]
    pub image_url: String,
}

/// Provider row about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProvider {
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub rating: f64,
    pub jobs: i64,
    pub image_url: String,
}

/// What a provider sees after signing in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProviderDashboard {
    pub profile: Provider,
    /// Every pending request, open to any provider.
    pub available: Vec<BookingRequest>,
    /// Requests this provider has confirmed.
    pub active: Vec<BookingRequest>,
    pub estimated_earnings: i64,
}

impl ProviderDashboard {
    /// Split `visible` (the provider-scoped listing) into open and owned work.
    pub fn assemble(profile: Provider, visible: Vec<BookingRequest>) -> Self {
        let (available, active): (Vec<_>, Vec<_>) =
            visible.into_iter().partition(|request| request.is_pending());
        let active = active
            .into_iter()
            .filter(|request| request.provider_name() == Some(profile.name.as_str()))
            .collect();
        let estimated_earnings = profile.jobs.saturating_mul(EARNINGS_PER_JOB);
        Self {
            profile,
            available,
            active,
            estimated_earnings,
        }
    }
}
