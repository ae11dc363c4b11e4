//! Driving port for login.
//!
//! Inbound adapters call this to authenticate credentials without importing
//! persistence, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AuthenticatedAccount, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the account's name and role.
    ///
    /// Unknown email, wrong password and wrong role all fail with the same
    /// unauthorized error.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedAccount, Error>;
}
