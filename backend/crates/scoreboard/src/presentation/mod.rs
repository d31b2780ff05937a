//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, and router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::ScoreboardState;
pub use router::{scoreboard_router, scoreboard_router_generic};
