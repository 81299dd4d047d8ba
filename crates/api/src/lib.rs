//! Copperleaf API library.
//!
//! JSON REST API backing the Copperleaf admin dashboard and storefront
//! SPAs. Reads are public; mutations require the admin bearer token.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` via sqlx for the catalog (brands, categories, menus,
//!   products, orders, banners, social links)
//! - Pure tree assembly and slug derivation live in `copperleaf-core`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
