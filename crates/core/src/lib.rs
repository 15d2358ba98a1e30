//! Printmint Core - Shared types library.
//!
//! This crate provides common types used across all Printmint components:
//! - `app` - Embedded-app backend (design generation, quota, product linking)
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, shop domains, and plans

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
