//! Value Objects

pub mod progress_delta;
pub mod user_name;
