use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Deserializer};

use crate::AppError;

/// `axum::Json` whose rejections render as `{"error": ...}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` whose rejections render as `{"error": ...}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct IdPath<T>(pub T);

/// Treats an empty string the same as an absent field.
pub(crate) fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// Accepts an id as a JSON integer or as a numeric string.
///
/// Anything else (null, floats, garbage strings) deserializes to `None` so the
/// handler reports the field as missing instead of failing the whole body.
/// Ids start at 1, so 0 counts as missing too.
pub(crate) fn lenient_id<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
        #[allow(dead_code)]
        Other(serde_json::Value),
    }

    let id = match Option::<Raw>::deserialize(de)? {
        Some(Raw::Int(id)) => Some(id),
        Some(Raw::Str(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(id.filter(|&id| id != 0))
}
