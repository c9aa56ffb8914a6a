//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the technical foundations the adapters sit on:
//! - Firebase configuration and the process-wide app bootstrap
//! - The authentication client (Identity Toolkit + Secure Token REST APIs)
//! - The Firestore REST client, value codec and structured-query model
//! - ID-token payload decoding
//! - Clear-text password handling (zeroized, policy-checked)

pub mod config;
pub mod crypto;
pub mod firebase;
pub mod password;
