//! Error adapter for converting Eve2GnsError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error gets
//! a stable code (`eve2gns::parse::E100`, `eve2gns::convert::segment_arity`,
//! ...) and, where one applies, a hint on how to fix the lab.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use eve2gns::{ConvertError, Eve2GnsError};

/// Adapter rendering an [`Eve2GnsError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a Eve2GnsError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use std::error::Error as _;

        // Parse and convert errors display their inner error as is; skip it.
        match self.0 {
            Eve2GnsError::Parse(err) => err.source(),
            Eve2GnsError::Convert(err) => err.source(),
            other => other.source(),
        }
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(error_code(self.0)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            Eve2GnsError::Parse(err) => err.help(),
            Eve2GnsError::Convert(err) => err.help(),
            Eve2GnsError::Io(_) | Eve2GnsError::Export(_) => None,
        };
        help.map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Stable diagnostic code of an error.
pub fn error_code(err: &Eve2GnsError) -> String {
    match err {
        Eve2GnsError::Io(_) => "eve2gns::io".to_string(),
        Eve2GnsError::Parse(err) => format!("eve2gns::parse::{}", err.code()),
        Eve2GnsError::Convert(err) => format!("eve2gns::convert::{}", convert_code(err)),
        Eve2GnsError::Export(_) => "eve2gns::export".to_string(),
    }
}

fn convert_code(err: &ConvertError) -> &'static str {
    match err {
        ConvertError::MissingInterface { .. } => "missing_interface",
        ConvertError::InvalidLink { .. } => "invalid_link",
        ConvertError::UnsupportedSegmentArity { .. } => "segment_arity",
        ConvertError::MalformedInterfaceName { .. } => "interface_name",
        ConvertError::UnsupportedNodeType { .. } => "node_type",
        ConvertError::UnknownNodeReference { .. } => "unknown_node",
        ConvertError::UnknownSegmentReference { .. } => "unknown_segment",
        ConvertError::MissingIconGeometry { .. } => "icon",
        ConvertError::ConsolePortRange { .. } => "console_port",
        ConvertError::UnsafeFileName { .. } => "file_name",
        ConvertError::DuplicateConfigName { .. } => "duplicate_config",
    }
}

/// Wrap an [`Eve2GnsError`] for rendering with miette.
pub fn to_reportable(err: &Eve2GnsError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use std::io;

    use eve2gns::identifier::{NodeId, SegmentId};
    use eve2gns_parser::error::ParseError;

    use super::*;

    fn rendered_code(adapter: &ErrorAdapter<'_>) -> Option<String> {
        adapter.code().map(|code| code.to_string())
    }

    fn rendered_help(adapter: &ErrorAdapter<'_>) -> Option<String> {
        adapter.help().map(|help| help.to_string())
    }

    #[test]
    fn test_parse_error_code_and_help() {
        let err = Eve2GnsError::Parse(ParseError::UnknownInterfaceType {
            element: "interface 0 of node 1".to_string(),
            interface_type: "atm".to_string(),
        });
        let adapter = to_reportable(&err);

        assert_eq!(
            adapter.to_string(),
            "interface 0 of node 1: unknown interface type `atm`"
        );
        assert_eq!(rendered_code(&adapter).as_deref(), Some("eve2gns::parse::E102"));
        assert_eq!(
            rendered_help(&adapter).as_deref(),
            Some("only `ethernet` and `serial` interfaces can be converted")
        );
    }

    #[test]
    fn test_convert_error_code_and_help() {
        let err = Eve2GnsError::Convert(ConvertError::UnsupportedSegmentArity {
            segment: SegmentId::new("4"),
            count: 3,
        });
        let adapter = to_reportable(&err);

        assert_eq!(
            rendered_code(&adapter).as_deref(),
            Some("eve2gns::convert::segment_arity")
        );
        assert!(rendered_help(&adapter).is_some());
    }

    #[test]
    fn test_convert_error_without_help() {
        let err = Eve2GnsError::Convert(ConvertError::MissingInterface {
            node: NodeId::new("1"),
            interface: "0".into(),
        });
        let adapter = to_reportable(&err);

        assert_eq!(
            rendered_code(&adapter).as_deref(),
            Some("eve2gns::convert::missing_interface")
        );
        assert_eq!(rendered_help(&adapter), None);
    }

    #[test]
    fn test_unsafe_file_name_code() {
        let err = Eve2GnsError::Convert(ConvertError::UnsafeFileName {
            name: "../lab".to_string(),
        });
        let adapter = to_reportable(&err);

        assert_eq!(adapter.to_string(), "`../lab` cannot be used as a file name");
        assert_eq!(
            rendered_code(&adapter).as_deref(),
            Some("eve2gns::convert::file_name")
        );
    }

    #[test]
    fn test_io_error() {
        let err = Eve2GnsError::Io(io::Error::new(io::ErrorKind::NotFound, "lab.unl"));
        let adapter = to_reportable(&err);

        assert_eq!(adapter.to_string(), "I/O error: lab.unl");
        assert_eq!(rendered_code(&adapter).as_deref(), Some("eve2gns::io"));
        assert_eq!(rendered_help(&adapter), None);
        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_report_renders_code_and_help() {
        let err = Eve2GnsError::Convert(ConvertError::UnsupportedNodeType {
            node: NodeId::new("7"),
            node_type: "vpcs".to_string(),
        });
        let adapter = to_reportable(&err);

        let mut rendered = String::new();
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut rendered, &adapter)
            .unwrap();

        assert!(rendered.contains("eve2gns::convert::node_type"));
        assert!(rendered.contains("node `7` has unsupported type `vpcs`"));
        assert!(rendered.contains("only `iol` and `qemu` nodes can be converted"));
    }
}
