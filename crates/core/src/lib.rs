//! NexusHub Core - Shared types library.
//!
//! This crate provides common types used across all NexusHub components:
//! - `storefront` - Public collection service (dashboard API + seller vitrines)
//! - `cli` - Command-line tools for migrations and administration
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, phone numbers,
//!   and the card metadata enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
