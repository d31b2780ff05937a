//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password policy checks on clear text input
//! - Password hashing (Argon2id) and verification, including hashes in the
//!   legacy bcrypt format

pub mod password;
