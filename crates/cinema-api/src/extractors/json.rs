//! JSON body extractor that also runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use cinema_core::error::AppError;

use crate::error::ApiError;

/// A JSON body that deserialized and passed its `Validate` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError::validation(rejection.body_text()).with_code("INVALID_BODY")
        })?;

        if let Err(errors) = value.validate() {
            let mut err =
                AppError::validation("Request validation failed").with_code("VALIDATION_ERROR");
            if let Ok(details) = serde_json::to_value(&errors) {
                err = err.with_details(details);
            }
            return Err(err.into());
        }

        Ok(Self(value))
    }
}
