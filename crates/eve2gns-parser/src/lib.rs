//! # eve2gns Parser
//!
//! Reader for EVE-NG `.unl` lab files. This crate turns the XML document
//! into the flat [`LabRecords`] consumed by the converter:
//!
//! 1. **Deserialize** - Read the XML structure with quick-xml
//! 2. **Convert** - Type attribute values, decode base64 configs and text
//!    objects, and extract annotation text from its HTML
//!
//! Nothing here checks that references between records resolve; that is the
//! converter's job.
//!
//! ## Usage
//!
//! ```
//! # use eve2gns_parser::{parse, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <lab name="demo">
//!           <topology>
//!             <nodes>
//!               <node id="1" name="R1" type="iol" icon="Router.png" left="100" top="200"/>
//!             </nodes>
//!           </topology>
//!         </lab>
//!     "#;
//!
//!     let records = parse(source)?;
//!     assert_eq!(records.meta.name, "demo");
//!     assert_eq!(records.nodes.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod annotation;
pub mod error;

mod convert;
mod unl;
mod value;

use log::{debug, info};

use eve2gns_core::record::LabRecords;

use error::ParseError;

/// Parse the text of a `.unl` file into lab records.
///
/// # Errors
///
/// Returns a [`ParseError`] when the document is not a well-formed lab,
/// when an attribute value cannot be read, or when an embedded payload
/// cannot be decoded.
pub fn parse(source: &str) -> Result<LabRecords, ParseError> {
    info!("Reading lab file");

    let lab: unl::Lab = quick_xml::de::from_str(source)?;
    debug!(
        lab_name = lab.name,
        nodes = lab.topology.nodes.items.len(),
        networks = lab.topology.networks.items.len();
        "Lab document deserialized"
    );

    convert::lab_to_records(lab)
}
