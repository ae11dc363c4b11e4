//! Login and signup handlers.
//!
//! ```text
//! POST /api/login  {"email":"user@example.com","password":"...","role":"user"}
//! POST /api/signup {"name":"Jane","email":"jane@example.com","password":"..."}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{
    AuthenticatedAccount, CredentialsValidationError, Error, INVALID_CREDENTIALS, LoginCredentials,
    Role, SignupDetails,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "user@example.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "user")]
    pub role: String,
}

/// Signup request body for `POST /api/signup`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Jane Roe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub password: String,
}

/// Successful signup payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupResponse {
    pub success: bool,
    pub name: String,
    pub role: Role,
}

fn validation_code(err: &CredentialsValidationError) -> &'static str {
    match err {
        CredentialsValidationError::EmptyName => "empty_name",
        CredentialsValidationError::EmptyEmail => "empty_email",
        CredentialsValidationError::InvalidEmail => "invalid_email",
        CredentialsValidationError::EmptyPassword => "empty_password",
        CredentialsValidationError::UnknownRole(_) => "unknown_role",
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": validation_code(&err),
    }))
}

/// Login payloads that cannot name an account fail like any other mismatch.
fn reject_login_shape(err: &CredentialsValidationError) -> Error {
    debug!(field = err.field(), code = validation_code(err), "login payload rejected");
    Error::unauthorized(INVALID_CREDENTIALS)
}

/// Check credentials and return the account's name and role.
///
/// Unknown email, wrong password, wrong or unknown role and blank fields are
/// indistinguishable: all answer 401 `invalid credentials`.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthenticatedAccount),
        (status = 400, description = "Malformed JSON body", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthenticatedAccount>> {
    let LoginRequest {
        email,
        password,
        role,
    } = payload.into_inner();
    let password = Zeroizing::new(password);
    let credentials = LoginCredentials::try_from_parts(&email, &password, &role)
        .map_err(|err| reject_login_shape(&err))?;

    let account = state.login.authenticate(&credentials).await?;
    info!(name = %account.name, role = account.role.as_str(), "login succeeded");
    Ok(web::Json(account))
}

/// Register a requester account. The role is always `user`.
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid request or email already registered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<SignupResponse>> {
    let SignupRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let password = Zeroizing::new(password);
    let details =
        SignupDetails::try_from_parts(&name, &email, &password).map_err(map_credentials_error)?;

    let account = state.signup.sign_up(&details).await?;
    Ok(web::Json(SignupResponse {
        success: true,
        name: account.name,
        role: account.role,
    }))
}
