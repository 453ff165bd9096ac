//! Error codes for the lab reader.
//!
//! Error codes are organized by phase:
//! - `E0xx` - XML document errors
//! - `E1xx` - Record attribute errors
//! - `E2xx` - Embedded payload errors (configs and text objects)

use std::fmt;

/// Error codes for categorizing reader errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // XML Errors (E0xx)
    // =========================================================================
    /// Malformed lab document.
    ///
    /// The file is not well-formed XML, or a required element or attribute
    /// of the `<lab>` structure is missing.
    E001,

    // =========================================================================
    // Record Errors (E1xx)
    // =========================================================================
    /// Invalid attribute value.
    ///
    /// A numeric attribute (adapter count, RAM, coordinate) could not be read.
    E100,

    /// Missing attribute.
    ///
    /// An interface lacks the attribute its type requires: `network_id` for
    /// ethernet interfaces, `remote_id` and `remote_if` for serial ones.
    E101,

    /// Unknown interface type.
    ///
    /// Only `ethernet` and `serial` interfaces are understood.
    E102,

    // =========================================================================
    // Payload Errors (E2xx)
    // =========================================================================
    /// Invalid base64 payload.
    E200,

    /// Text object is not valid UTF-8 once decoded.
    E201,

    /// Text object without a position.
    ///
    /// The text object's HTML carries no `left`/`top` style declarations.
    E202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed lab document",
            ErrorCode::E100 => "invalid attribute value",
            ErrorCode::E101 => "missing attribute",
            ErrorCode::E102 => "unknown interface type",
            ErrorCode::E200 => "invalid base64 payload",
            ErrorCode::E201 => "text object is not UTF-8",
            ErrorCode::E202 => "text object without position",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E102.to_string(), "E102");
        assert_eq!(ErrorCode::E202.to_string(), "E202");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "malformed lab document");
        assert_eq!(ErrorCode::E101.description(), "missing attribute");
        assert_eq!(ErrorCode::E200.description(), "invalid base64 payload");
    }
}
