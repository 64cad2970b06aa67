//! # Roster Core
//!
//! Foundational types shared by every roster crate.
//!
//! - [`errors`]: the tagged [`AppError`] and its HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use roster_core::AppError;
//!
//! let error = AppError::not_found("No teacher found");
//! assert_eq!(error.status(), axum::http::StatusCode::NOT_FOUND);
//! ```

pub mod errors;

pub use errors::{AppError, ErrorKind, ErrorResponse, INTERNAL_SERVER_ERROR};
