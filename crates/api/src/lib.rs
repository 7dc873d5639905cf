//! Roster API library.
//!
//! This crate provides the user service as a library, allowing it to be
//! tested and embedded. The `roster-api` binary wires it to the environment.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use app::app;
