//! Test helpers shared across crates in the workspace.
//!
//! Provides environment-variable guards and `.env` fixture-file builders.

pub mod env;
pub mod file;
