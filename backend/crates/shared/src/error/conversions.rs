//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from library error types to [`AppError`],
//! and the axum response rendering.

#[cfg(any(feature = "mongodb", feature = "axum"))]
use super::app_error::AppError;

// ============================================================================
// MongoDB conversions (feature-gated)
// ============================================================================

/// MongoDB の一意インデックス違反コード (E11000)
#[cfg(feature = "mongodb")]
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// 一意インデックス違反かどうかを判定
///
/// `insert_one` は書き込みエラー、`find_one_and_update` の upsert は
/// コマンドエラーとして返すため、両方を確認します。
#[cfg(feature = "mongodb")]
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind as MongoKind, WriteFailure};

    match err.kind.as_ref() {
        MongoKind::Write(WriteFailure::WriteError(write_err)) => {
            write_err.code == DUPLICATE_KEY_CODE
        }
        MongoKind::Command(command_err) => command_err.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind as MongoKind;

        let app_err = if is_duplicate_key(&err) {
            AppError::conflict("Duplicate key value")
        } else {
            match err.kind.as_ref() {
                MongoKind::ServerSelection { .. } => AppError::internal("Database unavailable"),
                MongoKind::Authentication { .. } => {
                    AppError::internal("Database authentication failed")
                }
                MongoKind::BsonDeserialization(_) | MongoKind::BsonSerialization(_) => {
                    AppError::internal("Stored document is malformed")
                }
                _ => AppError::internal("Database error"),
            }
        };
        app_err.with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.body())).into_response()
    }
}
