//! Error types for eve2gns operations.
//!
//! [`ConvertError`] covers everything that can go wrong while building the
//! topology graph or exporting it. [`Eve2GnsError`] is the top-level type
//! returned by [`crate::ConverterBuilder`], wrapping I/O, parse, conversion
//! and serialization failures.

use std::io;

use thiserror::Error;

use eve2gns_core::identifier::{InterfaceId, NodeId, SegmentId};
use eve2gns_parser::error::ParseError;

/// A type alias for `Result<T, ConvertError>`.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors raised while building or exporting a topology.
///
/// Every variant names the source record ids involved. Apart from
/// [`ConvertError::MissingInterface`], which the graph builder uses to tell
/// "already created" from "must create", all of them abort the conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("node `{node}` has no interface `{interface}`")]
    MissingInterface {
        node: NodeId,
        interface: InterfaceId,
    },

    #[error("interface `{interface}` of node `{node}` is already part of a complete link")]
    InvalidLink {
        node: NodeId,
        interface: InterfaceId,
    },

    #[error(
        "segment `{segment}` has {count} attached interface(s); only point-to-point segments can be converted"
    )]
    UnsupportedSegmentArity { segment: SegmentId, count: usize },

    #[error("interface `{interface}` of node `{node}` has malformed name `{name}`")]
    MalformedInterfaceName {
        node: NodeId,
        interface: InterfaceId,
        name: String,
    },

    #[error("node `{node}` has unsupported type `{node_type}`")]
    UnsupportedNodeType { node: NodeId, node_type: String },

    #[error("node `{node}` is referenced but never defined")]
    UnknownNodeReference { node: NodeId },

    #[error("interface `{interface}` of node `{node}` references unknown segment `{segment}`")]
    UnknownSegmentReference {
        node: NodeId,
        interface: InterfaceId,
        segment: SegmentId,
    },

    #[error("node `{node}` has no icon geometry: icon `{icon}` is neither a router nor a switch")]
    MissingIconGeometry { node: NodeId, icon: String },

    #[error("no console port left for node `{node}` when counting up from {start}")]
    ConsolePortRange { node: NodeId, start: u16 },

    #[error("`{name}` cannot be used as a file name")]
    UnsafeFileName { name: String },

    #[error("nodes `{first}` and `{second}` both have a startup config and share the name `{name}`")]
    DuplicateConfigName {
        name: String,
        first: NodeId,
        second: NodeId,
    },
}

impl ConvertError {
    /// Returns a hint on how to fix the lab, when one applies.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ConvertError::MissingInterface { .. } => None,
            ConvertError::InvalidLink { .. } => {
                Some("an interface can be wired to a single peer interface only")
            }
            ConvertError::UnsupportedSegmentArity { .. } => Some(
                "GNS3 links join exactly two interfaces; place a switch node on shared networks",
            ),
            ConvertError::MalformedInterfaceName { .. } => {
                Some("interface names must look like `<letters><adapter>/<port>`, e.g. `e0/1`")
            }
            ConvertError::UnsupportedNodeType { .. } => {
                Some("only `iol` and `qemu` nodes can be converted")
            }
            ConvertError::UnknownNodeReference { .. } => {
                Some("a serial link or startup config names a node missing from the lab")
            }
            ConvertError::UnknownSegmentReference { .. } => {
                Some("the lab has no `<network>` with this id")
            }
            ConvertError::MissingIconGeometry { .. } => {
                Some("give the node a router or switch icon in EVE-NG")
            }
            ConvertError::ConsolePortRange { .. } => Some("choose a lower console start port"),
            ConvertError::UnsafeFileName { .. } => {
                Some("lab and node names must not be empty or contain `/`, `\\` or `..`")
            }
            ConvertError::DuplicateConfigName { .. } => {
                Some("rename one of the nodes; configs are saved by node name")
            }
        }
    }
}

/// The main error type for eve2gns operations.
#[derive(Debug, Error)]
pub enum Eve2GnsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}
