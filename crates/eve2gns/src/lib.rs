//! eve2gns - Convert EVE-NG labs into GNS3 projects.
//!
//! Reads EVE-NG `.unl` lab files, builds a topology graph of devices,
//! interfaces, segments and links, maps positions onto a GNS3 scene and
//! writes the result as a `.gns3` project document.

pub mod config;
pub mod topology;

mod canvas;
mod error;
mod export;
mod ids;

pub use eve2gns_core::{geometry, identifier, record};

pub use canvas::Canvas;
pub use error::{ConvertError, Eve2GnsError};
pub use export::gns3;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use record::LabRecords;
use topology::Topology;

/// Builder for converting EVE-NG labs.
///
/// This provides an API for running a lab through the parsing, graph
/// building and export stages.
///
/// # Examples
///
/// ```rust
/// use eve2gns::{ConverterBuilder, config::AppConfig};
///
/// let source = r#"
///     <lab name="demo">
///       <topology>
///         <nodes>
///           <node id="1" name="R1" type="iol" icon="Router.png" left="100" top="200"/>
///         </nodes>
///       </topology>
///     </lab>
/// "#;
///
/// let builder = ConverterBuilder::new(AppConfig::default());
///
/// // Parse source to lab records
/// let records = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Build the topology graph
/// let topology = builder.convert(&records)
///     .expect("Failed to convert");
///
/// // Render the GNS3 project
/// let json = builder.render_json(&topology)
///     .expect("Failed to render");
/// assert!(json.contains("\"name\": \"demo\""));
/// ```
#[derive(Default)]
pub struct ConverterBuilder {
    config: AppConfig,
}

impl ConverterBuilder {
    /// Create a new converter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including canvas, console and
    ///   style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse the text of a `.unl` file into lab records.
    ///
    /// # Errors
    ///
    /// Returns [`Eve2GnsError::Parse`] for malformed documents, attribute
    /// values or payloads.
    pub fn parse(&self, source: &str) -> Result<LabRecords, Eve2GnsError> {
        info!("Parsing lab");

        let records = eve2gns_parser::parse(source)?;

        debug!(
            lab_name = records.meta.name,
            nodes = records.nodes.len(),
            segments = records.segments.len(),
            configs = records.configs.len(),
            annotations = records.annotations.len();
            "Lab parsed successfully"
        );
        trace!(records:?; "Parsed lab records");

        Ok(records)
    }

    /// Build the topology graph and compute its canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Eve2GnsError::Convert`] when references between records do
    /// not resolve or a segment is not point-to-point.
    pub fn convert(&self, records: &LabRecords) -> Result<Topology, Eve2GnsError> {
        info!(lab_name = records.meta.name; "Building topology");
        let topology = Topology::from_records(records, &self.config)?;
        Ok(topology)
    }

    /// Produce the GNS3 project document for a topology.
    ///
    /// # Errors
    ///
    /// Returns [`Eve2GnsError::Convert`] for nodes of unsupported types,
    /// nodes without icon geometry and malformed interface names.
    pub fn export(&self, topology: &Topology) -> Result<gns3::Project, Eve2GnsError> {
        info!("Exporting project");
        let project = Exporter::new(&self.config).export(topology)?;
        Ok(project)
    }

    /// Produce the GNS3 project file contents for a topology.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ConverterBuilder::export`], or
    /// [`Eve2GnsError::Export`] if serialization fails.
    pub fn render_json(&self, topology: &Topology) -> Result<String, Eve2GnsError> {
        let project = self.export(topology)?;
        let json = export::to_json(&project)?;
        debug!(bytes = json.len(); "Project serialized");
        Ok(json)
    }
}
