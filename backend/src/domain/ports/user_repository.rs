//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already registered.
        DuplicateEmail { email: String } => "an account with email {email} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account and its password digest by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Fetch the oldest account carrying `name`.
    ///
    /// Names are not unique; the lowest id wins.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new account.
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when the email is taken.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;
}
