//! Login and signup backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{LoginService, SignupService, UserRepository, UserRepositoryError};
use crate::domain::{
    AuthenticatedAccount, Error, LoginCredentials, NewUser, PasswordHash, Role, SignupDetails,
};

/// The single message every rejected login carries.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
const ACCOUNT_EXISTS: &str = "exists";

/// Account service implementing the login and signup driving ports.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => account_exists(),
    }
}

fn account_exists() -> Error {
    Error::account_exists(ACCOUNT_EXISTS).with_details(json!({ "field": "email" }))
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedAccount, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;

        let Some(account) = account else {
            PasswordHash::verify_dummy(credentials.password());
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let password_ok = account.password_hash.verify(credentials.password());
        if !password_ok || account.user.role != credentials.role() {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(AuthenticatedAccount {
            name: account.user.name,
            role: account.user.role,
        })
    }
}

#[async_trait]
impl<U> SignupService for AccountService<U>
where
    U: UserRepository,
{
    async fn sign_up(&self, details: &SignupDetails) -> Result<AuthenticatedAccount, Error> {
        let new_user = NewUser {
            name: details.name().to_owned(),
            email: details.email().to_owned(),
            password_hash: PasswordHash::derive(details.password()),
            role: Role::User,
        };
        let user = self.users.insert(&new_user).await.map_err(map_user_error)?;
        tracing::info!(user_id = %user.id, "account created");
        Ok(AuthenticatedAccount {
            name: user.name,
            role: user.role,
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
