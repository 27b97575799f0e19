//! JSON extractor that separates "could not parse" from "parsed but invalid".

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};
use validator::ValidationErrors;

/// A request payload that is checked field by field from a raw JSON object.
///
/// Implementors inspect the object directly so they can tell an absent key
/// from an explicit `null`, and so every violation is reported at once.
pub trait ValidatedPayload: Sized {
    fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationErrors>;
}

/// JSON extractor with explicit validation.
///
/// - body is not valid JSON, or not a JSON object → [`AppError::MalformedJson`] (400)
/// - object violates field constraints → [`AppError::ValidationError`] (422)
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::{ValidatedJson, ValidatedPayload};
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) -> String {
///     format!("Creating: {}", input.name())
/// }
///
/// let app = Router::new().route("/products", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: ValidatedPayload,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedJson(e.body_text()))?;

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| AppError::MalformedJson(e.to_string()))?;

        let Value::Object(payload) = value else {
            return Err(AppError::MalformedJson(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        };

        T::from_payload(&payload)
            .map(ValidatedJson)
            .map_err(AppError::from)
    }
}

/// Short name of a JSON value's type, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
