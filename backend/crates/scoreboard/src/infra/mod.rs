//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod mongo;

pub use memory::InMemoryUserRepository;
pub use mongo::MongoUserRepository;
