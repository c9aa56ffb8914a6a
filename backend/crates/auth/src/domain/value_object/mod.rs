//! Value Object Module

pub mod claims;
pub mod email;
pub mod persistence;
