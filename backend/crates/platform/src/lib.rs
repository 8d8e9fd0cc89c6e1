//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Hashing utilities (SHA-256, hex digests)
//! - Client identification from request headers
//! - An injectable wall clock

pub mod client;
pub mod clock;
pub mod crypto;
