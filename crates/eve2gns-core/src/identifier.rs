//! Typed identifiers for source lab records.
//!
//! EVE-NG identifies nodes, interfaces and networks by short numeric strings
//! that are only unique within their own kind (node `1` and network `1` are
//! unrelated, and interface ids repeat across nodes). Wrapping each kind in
//! its own type keeps them from being mixed up in lookups.
//!
//! All identifiers implement [`Borrow<str>`], so maps keyed by them can be
//! queried with a plain `&str`.
//!
//! # Examples
//!
//! ```
//! # use eve2gns_core::identifier::{NodeId, SegmentId};
//! let node = NodeId::new("1");
//! let segment = SegmentId::from("1");
//!
//! assert_eq!(node.as_str(), segment.as_str());
//! assert_eq!(node.to_string(), "1");
//! ```

use std::{borrow::Borrow, fmt};

macro_rules! source_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its source representation.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as it appeared in the source file.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

source_identifier!(
    /// Identifier of a device (`<node id="...">`).
    NodeId
);

source_identifier!(
    /// Identifier of an interface, unique only within its owning node.
    InterfaceId
);

source_identifier!(
    /// Identifier of a shared network segment (`<network id="...">`).
    SegmentId
);
