//! Copperleaf Core - Shared types library.
//!
//! This crate provides common types used across all Copperleaf components:
//! - `api` - JSON REST API serving the admin dashboard and public storefront
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs
//! - [`slug`] - URL-safe slug derivation with collision suffixing
//! - [`tree`] - Two-level parent/child tree assembly over flat records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod slug;
pub mod tree;
pub mod types;

pub use types::*;
