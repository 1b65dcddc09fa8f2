//! Request body extraction with validation.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use storefront_core::error::CoreError;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and passed its `Validate` rules.
///
/// Body input is strict: a malformed body or a field that fails its rules is
/// a 422 with a field -> message map. Only a missing JSON content type is a
/// plain 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject_body)?;
        value.validate().map_err(CoreError::from)?;
        Ok(Self(value))
    }
}

fn reject_body(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::BadRequest(rejection.body_text());
    }
    CoreError::invalid_field("body", rejection.body_text()).into()
}
