//! Extractor configuration turning malformed input into domain errors.
//!
//! Actix answers bad JSON, query strings and path segments with plain-text
//! 400s by default. These configs route them through [`Error`] so every
//! failure body has the same shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::Error;

/// Largest accepted JSON body.
pub const JSON_LIMIT_BYTES: usize = 16 * 1024;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let (code, message) = match &err {
        JsonPayloadError::ContentType => ("unsupported_content_type", "expected application/json".to_owned()),
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            ("payload_too_large", format!("request body exceeds {limit} bytes"))
        }
        JsonPayloadError::Deserialize(inner) => ("invalid_json", inner.to_string()),
        other => ("invalid_json", other.to_string()),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": code }))
        .into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}"))
        .with_details(json!({ "code": "invalid_query" }))
        .into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid path parameter: {err}"))
        .with_details(json!({ "code": "invalid_path" }))
        .into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(json_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
