//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment-driven configuration helpers
//! - Cryptographic utilities (random tokens, SHA-256 digests)
//! - Password hashing (Argon2id)
//! - Cookie and request-header helpers
//! - CORS origin policy
//! - Outbound mail (SMTP, best-effort)

pub mod client;
pub mod config;
pub mod cookie;
pub mod cors;
pub mod crypto;
pub mod mail;
pub mod password;
