//! Schema expectations on request input, backed by `validator`.
//!
//! Extractors here reject with [`ValidationRejection`], the validator's own
//! representation. The node tail normalises it into [`ApiError`] before the
//! error handler sees it.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::config::state::AppState;
use crate::utils::errors::{ApiError, FieldError};

#[derive(Debug, Clone, Default)]
pub struct Expect;

impl Expect {
    pub fn check<T: Validate>(&self, value: &T) -> Result<(), ValidationRejection> {
        value.validate().map_err(ValidationRejection::Fields)
    }

    /// Flattens field errors, sorted by field name
    pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field: String = field.to_string();
                errs.iter().map(move |err| FieldError {
                    field: field.clone(),
                    code: err.code.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} failed the '{}' check", field, err.code)),
                })
            })
            .collect();

        fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
        fields
    }
}

/// Why a request failed its expectations
#[derive(Debug, Clone)]
pub enum ValidationRejection {
    /// The payload could not be parsed
    Malformed(String),
    /// The payload parsed but broke field rules
    Fields(ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let mut response: Response = StatusCode::BAD_REQUEST.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl From<ValidationRejection> for ApiError {
    fn from(rejection: ValidationRejection) -> Self {
        match rejection {
            ValidationRejection::Malformed(message) => ApiError::BadRequest(message),
            ValidationRejection::Fields(errors) => ApiError::Validation {
                errors: Expect::field_errors(&errors),
            },
        }
    }
}

/// JSON body that must satisfy `T`'s validation rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationRejection::Malformed(rejection.body_text()))?;

        state.capabilities.expect.check(&value)?;
        Ok(Self(value))
    }
}

/// Query string that must satisfy `T`'s validation rules
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T> FromRequestParts<AppState> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationRejection::Malformed(rejection.body_text()))?;

        state.capabilities.expect.check(&value)?;
        Ok(Self(value))
    }
}
