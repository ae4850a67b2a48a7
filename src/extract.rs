//! Request extraction
//!
//! Write endpoints take either a JSON body or a URL-encoded form. Rejections
//! from the body, query and path decoders become `AppError`s so the client
//! always gets the standard error envelope.

use crate::error::{validation_error, AppError};
use axum::{
    extract::{
        path::ErrorKind, rejection::PathRejection, FromRequest, FromRequestParts, MatchedPath,
        Path, Query, Request,
    },
    http::{header, request::Parts, StatusCode},
    Form, Json,
};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;

/// Body decoded from JSON or `application/x-www-form-urlencoded`
#[derive(Debug)]
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Over-limit bodies keep their 413; every other body rejection is a 400
fn body_error(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(text)
    } else {
        validation_error(text)
    }
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| body_error(rejection.status(), rejection.body_text()))?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| body_error(rejection.status(), rejection.body_text()))?;
            Ok(Payload(value))
        }
    }
}

/// Query string decoded into `T`
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| validation_error(rejection.body_text()))?;
        Ok(QueryParams(value))
    }
}

/// The single `{id}`-style capture of a route, as text
///
/// A capture that does not decode to UTF-8 is kept lossily: it can never be
/// numeric, so handlers treat it like any other id that matches no row.
#[derive(Debug)]
pub struct PathId(pub String);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(PathId(id)),
            Err(PathRejection::FailedToDeserializePathParams(err))
                if matches!(err.kind(), ErrorKind::InvalidUtf8InPathParam { .. }) =>
            {
                Ok(PathId(lossy_capture(parts).unwrap_or_default()))
            }
            Err(rejection) => Err(validation_error(rejection.body_text())),
        }
    }
}

/// Percent-decode the raw segment sitting where the route template has its capture
fn lossy_capture(parts: &Parts) -> Option<String> {
    let template = parts.extensions.get::<MatchedPath>()?;
    let position = template
        .as_str()
        .split('/')
        .position(|segment| segment.starts_with('{'))?;
    let raw = parts.uri.path().split('/').nth(position)?;

    Some(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}
