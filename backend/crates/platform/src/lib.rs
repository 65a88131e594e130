//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, random bytes)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management
//! - Client IP extraction
//! - Rate limiting configuration

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
