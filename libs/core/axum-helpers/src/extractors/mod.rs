//! Extractors whose rejections are [`AppError`](crate::errors::AppError)s,
//! so every malformed request gets the same error body.

pub mod query_params;
pub mod uuid_path;
pub mod validated_json;

pub use query_params::QueryParams;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
