//! # mlnviz-error
//!
//! Unified error handling for mlnviz.
//!
//! - **ErrorKind**: what went wrong (ParseFailed, RenderFailed, ...)
//! - **Operation**: where it went wrong, chained as the error bubbles up
//! - **Context**: key/value pairs that locate the cause (file, line, renderer)
//! - **Source**: the wrapped lower-level error, if any
//!
//! ## Usage
//!
//! ```rust
//! use mlnviz_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ParseFailed, "expected 2 fields, found 3")
//!         .with_operation("format::parse_vcom")
//!         .with_context("file", "L2.vcom")
//!         .with_context("line", "7"))
//! }
//! ```
//!
//! There is no retry classification: nothing in mlnviz retries. A failed
//! parse aborts the request, a failed renderer becomes a negative result.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using mlnviz Error
pub type Result<T> = std::result::Result<T, Error>;
