//! Core types for Roster.

pub mod id;
pub mod user;

pub use id::*;
pub use user::{User, UserDraft};
