//! Common utilities shared across the receipt points service
//!
//! This crate provides shared functionality used by the `processing` and
//! `receipts` crates:
//!
//! - YAML configuration loading with `!include` support
//! - Shared test utilities and assertion helpers
pub mod config;
pub mod yaml_include;

// Test helpers module - available for both development and test builds
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{TestError, TestResult};
