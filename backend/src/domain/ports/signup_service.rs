//! Driving port for self-service account creation.

use async_trait::async_trait;

use crate::domain::{AuthenticatedAccount, Error, SignupDetails};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a requester account.
    ///
    /// The role is always `user`. A taken email fails with
    /// [`ErrorCode::AccountExists`](crate::domain::ErrorCode::AccountExists).
    async fn sign_up(&self, details: &SignupDetails) -> Result<AuthenticatedAccount, Error>;
}
