//! Integration test suite for simport
//!
//! End-to-end tests that load template, schema and rule files from disk,
//! resolve them through the public API and drive the `simport` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolution**: Resolving on-disk templates with standard and custom rules
//! - **determinism**: Stable output across runs and declaration orders
//! - **cli_resolve**: The `resolve` command
//! - **cli_check_header**: The `check-header` command

mod cli_check_header;
mod cli_resolve;
mod determinism;
mod resolution;
