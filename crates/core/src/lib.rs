//! GrindCTRL Core - Shared types library.
//!
//! This crate provides common types used across all GrindCTRL components:
//! - `engine` - Cart, checkout, and order lifecycle engine
//! - `cli` - Command-line smoke-test driver
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, phone
//!   numbers, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
