use axum::Form;
use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use portaria_core::AppError;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body extractor accepting either an HTML form or JSON, keyed off the
/// request Content-Type. The variant also tells handlers which response
/// shape the caller expects (re-rendered page vs JSON with status codes).
#[derive(Debug)]
pub enum Payload<T> {
    Form(T),
    Json(T),
}

impl<T> Payload<T> {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Form(value) | Self::Json(value) => value,
        }
    }
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(request, state)
                .await
                .map_err(|error| AppError::Validation(format!("invalid JSON body: {error}")))?;
            Ok(Self::Json(value))
        } else {
            let Form(value) = Form::<T>::from_request(request, state)
                .await
                .map_err(|error| AppError::Validation(format!("invalid form body: {error}")))?;
            Ok(Self::Form(value))
        }
    }
}
