//! Request extractors

use axum::extract::FromRequest;

use crate::error::ScoreboardError;

/// `axum::Json` whose rejection renders like every other scoreboard error
/// (400 with a `message` body) instead of axum's plain-text 415/422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ScoreboardError))]
pub struct JsonBody<T>(pub T);
