//! Core types for simport
//!
//! This module holds the error types shared by every other module:
//! - [`SimportError`] - enumerated failure modes of template resolution
//! - [`ErrorContext`] - user-facing wrapper with suggestion and details
//! - [`user_friendly_error`] - convert any [`anyhow::Error`] for CLI display
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use simport_cli::core::{SimportError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(SimportError::InvalidTemplate {
//!         reason: "template has no columns".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.to_string().contains("no columns"));
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, SimportError, user_friendly_error};
