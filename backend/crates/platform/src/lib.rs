//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - HS256 token signing/verification
//! - Strict JSON request body extraction

pub mod json;
pub mod jwt;
pub mod password;
