//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, hex digests)
//! - Client identification (IP extraction, rate-limit identifiers)
//! - Shared-store abstraction and Redis implementation
//! - Rate limiting infrastructure (fleet-wide with in-process fallback)

pub mod client;
pub mod config;
pub mod crypto;
pub mod rate_limit;
pub mod redis_store;
pub mod store;
