//! Error types for the lab reader.
//!
//! Every [`ParseError`] carries an [`ErrorCode`] for documentation and
//! searchability, plus optional help text used by the CLI when rendering
//! reports.

mod error_code;
mod parse_error;

pub(crate) use parse_error::Result;

pub use error_code::ErrorCode;
pub use parse_error::ParseError;
