use crate::domain::requests::product::{CREATE_PRODUCT_REQUIRED_FIELDS, CreateProductRequest};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::errors::{HttpError, ServiceError};

/// Request bodies that name the keys they cannot do without.
pub trait RequiredFields {
    const REQUIRED_FIELDS: &'static [&'static str];
}

impl RequiredFields for CreateProductRequest {
    const REQUIRED_FIELDS: &'static [&'static str] = &CREATE_PRODUCT_REQUIRED_FIELDS;
}

/// JSON body extractor that reports an absent body, a non-object body, or a
/// missing/`null` required key as `Missing required fields` before typed
/// deserialization is attempted. The `Content-Type` header is not checked.
pub struct RequiredJson<T>(pub T);

impl<S, T> FromRequest<S> for RequiredJson<T>
where
    T: DeserializeOwned + RequiredFields + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::Rejected(rejection.status(), rejection.body_text()))?;

        let map = match parse_object(&body)? {
            Some(map) if has_required_fields(&map, T::REQUIRED_FIELDS) => map,
            _ => return Err(missing_fields()),
        };

        let value = serde_json::from_value::<T>(Value::Object(map))
            .map_err(|e| HttpError::BadRequest(format!("Invalid field: {e}")))?;

        Ok(Self(value))
    }
}

/// `Path` whose parse failures answer with the JSON error body.
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| HttpError::Rejected(rejection.status(), rejection.body_text()))?;

        Ok(Self(value))
    }
}

fn missing_fields() -> HttpError {
    HttpError::from(ServiceError::missing_fields())
}

/// `None` for an empty body or any JSON value that is not an object.
fn parse_object(body: &[u8]) -> Result<Option<serde_json::Map<String, Value>>, HttpError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| HttpError::BadRequest(format!("Invalid JSON body: {e}")))?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

fn has_required_fields(map: &serde_json::Map<String, Value>, required: &[&str]) -> bool {
    required
        .iter()
        .all(|key| map.get(*key).is_some_and(|v| !v.is_null()))
}
