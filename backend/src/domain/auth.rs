//! Authentication primitives: login credentials and signup details.
//!
//! Inbound adapters hand raw strings to these constructors so that shape
//! validation happens before any port or service is called.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{Role, UnknownRole};

/// Domain error returned when login or signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    EmptyName,
    EmptyEmail,
    InvalidEmail,
    EmptyPassword,
    UnknownRole(String),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain '@'"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::UnknownRole(role) => write!(f, "role must be 'user' or 'provider', got '{role}'"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl CredentialsValidationError {
    /// Name of the payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
            Self::UnknownRole(_) => "role",
        }
    }
}

impl From<UnknownRole> for CredentialsValidationError {
    fn from(value: UnknownRole) -> Self {
        Self::UnknownRole(value.0)
    }
}

fn normalise_email(email: &str) -> Result<String, CredentialsValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CredentialsValidationError::EmptyEmail);
    }
    if !email.contains('@') {
        return Err(CredentialsValidationError::InvalidEmail);
    }
    Ok(email.to_owned())
}

fn require_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, non-empty and contains `@`.
/// - `password` is non-empty and kept verbatim, whitespace included.
///
/// # Examples
/// ```
/// use service_finder::domain::{LoginCredentials, Role};
///
/// let creds = LoginCredentials::try_from_parts(" user@example.com ", "pw", "user")
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "user@example.com");
/// assert_eq!(creds.role(), Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
    role: Role,
}

impl LoginCredentials {
    pub fn try_from_parts(
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let email = normalise_email(email)?;
        let password = require_password(password)?;
        let role = role.trim().parse::<Role>()?;
        Ok(Self {
            email,
            password,
            role,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Validated signup request. The resulting account always has [`Role::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl SignupDetails {
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }
        let email = normalise_email(email)?;
        let password = require_password(password)?;
        Ok(Self {
            name: name.to_owned(),
            email,
            password,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity returned by a successful login or signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedAccount {
    #[schema(example = "John Doe")]
    pub name: String,
    pub role: Role,
}
