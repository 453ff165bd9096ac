//! The topology graph: nodes, interfaces, segments, links and drawings.
//!
//! A topology is built in two phases. [`TopologyBuilder`] takes the lab
//! records in a fixed order (segments, nodes, configs, drawings) and then
//! resolves every segment into a link. [`TopologyBuilder::build`] computes
//! the canvas from the final node positions and freezes the graph into a
//! [`Topology`], so every coordinate derived afterwards uses one transform.
//!
//! Ownership is strictly topology -> node -> interface. Everything else
//! (segment membership, link endpoints, serial peers) refers to interfaces
//! through [`InterfaceRef`] keys.

mod drawing;
mod interface;
mod link;
mod node;
mod segment;

pub use drawing::Drawing;
pub use interface::{Attachment, Interface, InterfaceRef, parse_adapter_port};
pub use link::{Link, LinkLabels};
pub use node::{Icon, Node, NodeDetails, Role};
pub use segment::Segment;

use std::{
    collections::HashMap,
    path::{Component, Path},
};

use indexmap::IndexMap;
use log::{debug, info, trace, warn};

use eve2gns_core::{
    identifier::{InterfaceId, NodeId, SegmentId},
    record::{
        AnnotationRecord, ConfigRecord, InterfaceAttachment, InterfaceRecord, LabMeta,
        LabRecords, NodeRecord, SegmentRecord,
    },
};

use crate::{
    canvas::Canvas,
    config::AppConfig,
    error::{ConvertError, Result},
};

/// Mutable topology graph under construction.
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    meta: LabMeta,
    nodes: IndexMap<NodeId, Node>,
    segments: IndexMap<SegmentId, Segment>,
    links: Vec<Link>,
    drawings: Vec<Drawing>,
    segments_resolved: bool,
}

impl TopologyBuilder {
    pub fn new(meta: LabMeta) -> Self {
        Self {
            meta,
            nodes: IndexMap::new(),
            segments: IndexMap::new(),
            links: Vec::new(),
            drawings: Vec::new(),
            segments_resolved: false,
        }
    }

    /// Runs every build step over a lab in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConvertError`] raised by any step.
    pub fn from_records(records: &LabRecords) -> Result<Self> {
        let mut builder = Self::new(records.meta.clone());

        for segment in &records.segments {
            builder.add_segment(segment);
        }
        for node in &records.nodes {
            builder.add_node(node)?;
        }
        builder.check_placeholders()?;
        for config in &records.configs {
            builder.attach_config(config)?;
        }
        for annotation in &records.annotations {
            builder.add_drawing(annotation);
        }
        builder.resolve_segments()?;

        info!(
            nodes = builder.nodes.len(),
            segments = builder.segments.len(),
            links = builder.links.len(),
            drawings = builder.drawings.len();
            "Topology graph built"
        );

        Ok(builder)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Creates an empty segment.
    pub fn add_segment(&mut self, record: &SegmentRecord) {
        if self.segments.contains_key(&record.id) {
            warn!(segment_id = record.id.as_str(); "Segment defined more than once, keeping the first");
            return;
        }
        trace!(segment_id = record.id.as_str(); "Adding segment");
        self.segments
            .insert(record.id.clone(), Segment::new(record.id.clone()));
    }

    /// Adds a node and its interfaces, filling in a placeholder if a serial
    /// link already referenced it.
    ///
    /// # Errors
    ///
    /// Fails when an interface references an unknown segment, or when a
    /// serial link cannot be wired.
    pub fn add_node(&mut self, record: &NodeRecord) -> Result<()> {
        debug!(node_id = record.id.as_str(), name = record.name; "Adding node");

        let node = self
            .nodes
            .entry(record.id.clone())
            .or_insert_with(|| Node::placeholder(record.id.clone()));
        if node.fill_in(NodeDetails::from(record)) {
            warn!(node_id = record.id.as_str(); "Node defined more than once, refreshing its details");
        }

        for interface in &record.interfaces {
            self.add_interface(&record.id, interface)?;
        }
        Ok(())
    }

    fn add_interface(&mut self, node_id: &NodeId, record: &InterfaceRecord) -> Result<()> {
        let name = Some(record.name.clone()).filter(|name| !name.is_empty());

        let node = self.node_mut(node_id)?;
        if let Ok(existing) = node.get_interface_mut(&record.id) {
            trace!(node_id = node_id.as_str(), interface_id = record.id.as_str(); "Interface already created");
            existing.set_name(name);
            return Ok(());
        }

        match &record.attachment {
            InterfaceAttachment::Shared { segment } => self.create_interface(
                node_id,
                record.id.clone(),
                name,
                Attachment::Shared(segment.clone()),
            ),
            InterfaceAttachment::Direct {
                remote_node,
                remote_interface,
            } => self.add_direct_interface(
                InterfaceRef::new(node_id.clone(), record.id.clone()),
                name,
                InterfaceRef::new(remote_node.clone(), remote_interface.clone()),
            ),
        }
    }

    /// Registers an interface on its node and, for a shared attachment, on
    /// its segment.
    fn create_interface(
        &mut self,
        node_id: &NodeId,
        id: InterfaceId,
        name: Option<String>,
        attachment: Attachment,
    ) -> Result<()> {
        if let Attachment::Shared(segment_id) = &attachment {
            let segment = self.segments.get_mut(segment_id).ok_or_else(|| {
                ConvertError::UnknownSegmentReference {
                    node: node_id.clone(),
                    interface: id.clone(),
                    segment: segment_id.clone(),
                }
            })?;
            segment.attach(InterfaceRef::new(node_id.clone(), id.clone()));
        }

        self.node_mut(node_id)?
            .create_interface(id, name, attachment);
        Ok(())
    }

    /// Wires a serial interface to its peer and links them.
    ///
    /// The peer node is created as a placeholder and the peer interface is
    /// created unnamed if they do not exist yet. When the peer's own record
    /// is read later, the interface is found and only its name is set, so
    /// the link is created once.
    fn add_direct_interface(
        &mut self,
        local: InterfaceRef,
        name: Option<String>,
        remote: InterfaceRef,
    ) -> Result<()> {
        if local == remote {
            return Err(ConvertError::InvalidLink {
                node: local.node,
                interface: local.interface,
            });
        }

        if !self.nodes.contains_key(&remote.node) {
            debug!(node_id = remote.node.as_str(); "Creating placeholder for serial peer");
            self.nodes
                .insert(remote.node.clone(), Node::placeholder(remote.node.clone()));
        }

        let remote_node = self.node_mut(&remote.node)?;
        match remote_node.get_interface_mut(&remote.interface) {
            Ok(existing) => {
                if existing.link().is_some() {
                    return Err(ConvertError::InvalidLink {
                        node: remote.node,
                        interface: remote.interface,
                    });
                }
                existing.connect_to(local.clone());
            }
            Err(ConvertError::MissingInterface { .. }) => {
                remote_node.create_interface(
                    remote.interface.clone(),
                    None,
                    Attachment::Direct(local.clone()),
                );
            }
            Err(err) => return Err(err),
        }

        self.create_interface(
            &local.node,
            local.interface.clone(),
            name,
            Attachment::Direct(remote.clone()),
        )?;

        self.add_link(local, remote)
    }

    /// Creates a link between two existing interfaces.
    fn add_link(&mut self, first: InterfaceRef, second: InterfaceRef) -> Result<()> {
        for endpoint in [&first, &second] {
            if self.interface(endpoint)?.link().is_some() {
                return Err(ConvertError::InvalidLink {
                    node: endpoint.node.clone(),
                    interface: endpoint.interface.clone(),
                });
            }
        }

        let index = self.links.len();
        let link = Link::new(first.clone(), second.clone())?;

        self.interface_mut(&first)?.set_link(index);
        self.interface_mut(&second)?.set_link(index);

        debug!(
            link = index,
            first_node = first.node.as_str(),
            first_interface = first.interface.as_str(),
            second_node = second.node.as_str(),
            second_interface = second.interface.as_str();
            "Link created"
        );
        self.links.push(link);
        Ok(())
    }

    /// Fails if a serial link named a node whose record never appeared.
    pub fn check_placeholders(&self) -> Result<()> {
        match self.nodes.values().find(|node| node.is_placeholder()) {
            Some(node) => Err(ConvertError::UnknownNodeReference {
                node: node.id().clone(),
            }),
            None => Ok(()),
        }
    }

    /// Attaches a startup configuration to its node.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnknownNodeReference`] if no node has the
    /// configuration's id.
    pub fn attach_config(&mut self, record: &ConfigRecord) -> Result<()> {
        let node = self.node_mut(&record.node_id)?;
        if node.set_config(record.data.clone()) {
            warn!(node_id = record.node_id.as_str(); "Node has more than one config, keeping the last");
        }
        trace!(node_id = record.node_id.as_str(), bytes = record.data.len(); "Config attached");
        Ok(())
    }

    pub fn add_drawing(&mut self, record: &AnnotationRecord) {
        let index = self.drawings.len();
        trace!(drawing = index; "Adding drawing");
        self.drawings
            .push(Drawing::new(index, record.text.clone(), record.position));
    }

    /// Turns every two-member segment into a link.
    ///
    /// Only the first call has an effect, so resolving twice never
    /// duplicates links.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnsupportedSegmentArity`] for a segment with
    /// one or more than two members.
    pub fn resolve_segments(&mut self) -> Result<()> {
        if self.segments_resolved {
            debug!("Segments already resolved");
            return Ok(());
        }

        let mut pairs = Vec::new();
        for segment in self.segments.values() {
            if let Some(pair) = segment.resolve()? {
                pairs.push(pair);
            }
        }
        for (first, second) in pairs {
            self.add_link(first, second)?;
        }

        self.segments_resolved = true;
        Ok(())
    }

    /// Freezes the graph and computes its canvas.
    pub fn build(self, config: &AppConfig) -> Topology {
        let canvas = Canvas::compute(
            self.nodes
                .values()
                .filter_map(|node| node.details().ok())
                .map(|details| details.position),
            config.canvas(),
        );

        Topology {
            meta: self.meta,
            nodes: self.nodes,
            segments: self.segments,
            links: self.links,
            drawings: self.drawings,
            canvas,
        }
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| ConvertError::UnknownNodeReference { node: id.clone() })
    }

    fn interface(&self, endpoint: &InterfaceRef) -> Result<&Interface> {
        self.nodes
            .get(&endpoint.node)
            .ok_or_else(|| ConvertError::UnknownNodeReference {
                node: endpoint.node.clone(),
            })?
            .get_interface(&endpoint.interface)
    }

    fn interface_mut(&mut self, endpoint: &InterfaceRef) -> Result<&mut Interface> {
        self.node_mut(&endpoint.node)?
            .get_interface_mut(&endpoint.interface)
    }
}

/// A complete topology with a frozen canvas.
#[derive(Debug, Clone)]
pub struct Topology {
    meta: LabMeta,
    nodes: IndexMap<NodeId, Node>,
    segments: IndexMap<SegmentId, Segment>,
    links: Vec<Link>,
    drawings: Vec<Drawing>,
    canvas: Canvas,
}

impl Topology {
    /// Builds a topology from lab records.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConvertError`] raised while building the graph.
    pub fn from_records(records: &LabRecords, config: &AppConfig) -> Result<Self> {
        let topology = TopologyBuilder::from_records(records)?.build(config);
        info!(
            width = topology.canvas.size().width(),
            height = topology.canvas.size().height();
            "Canvas computed"
        );
        Ok(topology)
    }

    pub fn meta(&self) -> &LabMeta {
        &self.meta
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: &NodeId) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| ConvertError::UnknownNodeReference { node: id.clone() })
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    /// Looks up the interface an endpoint refers to.
    pub fn interface(&self, endpoint: &InterfaceRef) -> Result<&Interface> {
        self.node(&endpoint.node)?.get_interface(&endpoint.interface)
    }

    /// Startup configurations keyed by node display name, in node order.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnsafeFileName`] for a display name that is
    /// not a plain file name, and [`ConvertError::DuplicateConfigName`] when
    /// two nodes with configurations share a display name.
    pub fn configs(&self) -> Result<Vec<(&str, &[u8])>> {
        let mut owners: HashMap<&str, &NodeId> = HashMap::new();
        let mut configs = Vec::new();
        for node in self.nodes.values() {
            let Some(data) = node.config() else {
                continue;
            };
            let name = check_file_name(&node.details()?.name)?;
            if let Some(first) = owners.insert(name, node.id()) {
                return Err(ConvertError::DuplicateConfigName {
                    name: name.to_string(),
                    first: first.clone(),
                    second: node.id().clone(),
                });
            }
            configs.push((name, data));
        }
        Ok(configs)
    }
}

/// Accepts `name` only if it is a single plain path component.
///
/// # Errors
///
/// Returns [`ConvertError::UnsafeFileName`] for empty names, `.` and `..`,
/// and names holding a path separator.
///
/// # Examples
///
/// ```
/// # use eve2gns::topology::check_file_name;
/// assert_eq!(check_file_name("R1"), Ok("R1"));
/// assert!(check_file_name("../R1").is_err());
/// ```
pub fn check_file_name(name: &str) -> Result<&str> {
    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\']);

    if plain {
        Ok(name)
    } else {
        Err(ConvertError::UnsafeFileName {
            name: name.to_string(),
        })
    }
}
