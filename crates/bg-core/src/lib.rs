//! # bg-core
//!
//! Configuration and error handling for the billing grants mapper.
//!
//! This crate provides the foundational types used by the other billing
//! grants crates: the roles-service configuration loaded once at startup,
//! and the core error type.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod error;

pub use config::RolesConfig;
pub use error::{Error, Result};
