//! Roster Core - Shared types library.
//!
//! This crate provides the types shared by the Roster components:
//! - `api` - HTTP service exposing the user resource
//! - `integration-tests` - End-to-end tests against a live database
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding is available behind the `postgres`
//! feature so the types can be bound directly as query parameters.
//!
//! # Modules
//!
//! - [`types`] - The `User` entity, its write shape, and its ID newtype

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
