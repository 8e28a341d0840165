//! Integration test utilities for the cafe finder API
//!
//! This crate provides helpers for running end-to-end tests against
//! a live server backed by MySQL and Redis.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
