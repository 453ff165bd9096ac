//! The ParseError type returned by the lab reader.

use thiserror::Error;

use crate::error::ErrorCode;

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Error type for reading a lab file.
///
/// Every variant names the element it was raised for (for example
/// `node 3` or `interface 16 of node 3`).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed lab file: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("{element}: invalid value `{value}` for attribute `{attribute}`")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("{element}: missing attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("{element}: unknown interface type `{interface_type}`")]
    UnknownInterfaceType {
        element: String,
        interface_type: String,
    },

    #[error("{element}: invalid base64 payload: {source}")]
    Payload {
        element: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("{element}: text is not valid UTF-8")]
    AnnotationEncoding { element: String },

    #[error("{element}: no `left`/`top` position found")]
    AnnotationPosition { element: String },
}

impl ParseError {
    /// Returns the code categorizing this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Xml(_) => ErrorCode::E001,
            ParseError::InvalidAttribute { .. } => ErrorCode::E100,
            ParseError::MissingAttribute { .. } => ErrorCode::E101,
            ParseError::UnknownInterfaceType { .. } => ErrorCode::E102,
            ParseError::Payload { .. } => ErrorCode::E200,
            ParseError::AnnotationEncoding { .. } => ErrorCode::E201,
            ParseError::AnnotationPosition { .. } => ErrorCode::E202,
        }
    }

    /// Returns a hint on how to fix the input, when one applies.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::Xml(_) => {
                Some("export the lab again from EVE-NG and check the file is complete")
            }
            ParseError::InvalidAttribute { .. } => {
                Some("numeric attributes must be integers; coordinates may end with `%`")
            }
            ParseError::MissingAttribute { .. } => None,
            ParseError::UnknownInterfaceType { .. } => {
                Some("only `ethernet` and `serial` interfaces can be converted")
            }
            ParseError::Payload { .. } | ParseError::AnnotationEncoding { .. } => None,
            ParseError::AnnotationPosition { .. } => {
                Some("text objects need `left` and `top` in their style attribute")
            }
        }
    }
}
