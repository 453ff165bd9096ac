//! Flat lab records exchanged between the reader and the converter.
//!
//! The reader turns a `.unl` file into [`LabRecords`]; the converter builds
//! its topology graph from them. Records are plain data: references between
//! them (an interface naming a segment, a serial interface naming a remote
//! node) are identifiers, and nothing here checks that they resolve.

use crate::{
    geometry::{Point, Size},
    identifier::{InterfaceId, NodeId, SegmentId},
};

/// Everything read from one lab file, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabRecords {
    pub meta: LabMeta,
    pub segments: Vec<SegmentRecord>,
    pub nodes: Vec<NodeRecord>,
    pub configs: Vec<ConfigRecord>,
    pub annotations: Vec<AnnotationRecord>,
}

/// Lab-level metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabMeta {
    /// Display name of the lab
    pub name: String,
    /// The lab's own UUID, when the source file carries one
    pub lab_id: Option<String>,
}

impl LabMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lab_id: None,
        }
    }
}

/// A shared broadcast network (`<network>`).
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub id: SegmentId,
}

impl SegmentRecord {
    pub fn new(id: impl Into<SegmentId>) -> Self {
        Self { id: id.into() }
    }
}

/// One coordinate of a source position.
///
/// EVE-NG stores most positions in pixels, but older labs and some text
/// objects use percentages of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceCoord {
    Absolute(f64),
    Percent(f64),
}

impl SourceCoord {
    /// Resolves the coordinate to pixels, using `extent` for percentages.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            SourceCoord::Absolute(value) => value,
            SourceCoord::Percent(percent) => percent / 100.0 * extent,
        }
    }
}

impl Default for SourceCoord {
    fn default() -> Self {
        SourceCoord::Absolute(0.0)
    }
}

/// Position of a node or annotation on the source canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourcePosition {
    pub x: SourceCoord,
    pub y: SourceCoord,
}

impl SourcePosition {
    pub fn new(x: SourceCoord, y: SourceCoord) -> Self {
        Self { x, y }
    }

    /// Creates a position in absolute pixels.
    pub fn absolute(x: f64, y: f64) -> Self {
        Self::new(SourceCoord::Absolute(x), SourceCoord::Absolute(y))
    }

    /// Resolves both coordinates to pixels against a reference canvas.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eve2gns_core::geometry::{Point, Size};
    /// # use eve2gns_core::record::{SourceCoord, SourcePosition};
    /// let position = SourcePosition::new(SourceCoord::Percent(50.0), SourceCoord::Absolute(120.0));
    /// let resolved = position.resolve(Size::new(2000.0, 1000.0));
    /// assert_eq!(resolved, Point::new(1000.0, 120.0));
    /// ```
    pub fn resolve(self, reference: Size) -> Point {
        Point::new(
            self.x.resolve(reference.width()),
            self.y.resolve(reference.height()),
        )
    }
}

/// Type-specific attributes of a device.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Cisco IOU/IOL image
    Iol(IolAttributes),
    /// QEMU virtual machine
    Qemu(QemuAttributes),
    /// Any other EVE-NG node type; kept so that the error can name it
    Unsupported { node_type: String },
}

impl NodeKind {
    /// The EVE-NG `type` attribute this kind was read from.
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Iol(_) => "iol",
            NodeKind::Qemu(_) => "qemu",
            NodeKind::Unsupported { node_type } => node_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IolAttributes {
    /// Number of ethernet adapters (four ports each)
    pub ethernet: u32,
    /// Number of serial adapters (four ports each)
    pub serial: u32,
    /// NVRAM in KiB
    pub nvram: u32,
    /// RAM in MiB
    pub ram: u32,
}

impl Default for IolAttributes {
    fn default() -> Self {
        Self {
            ethernet: 1,
            serial: 0,
            nvram: 1024,
            ram: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QemuAttributes {
    pub cpus: u32,
    /// RAM in MiB
    pub ram: u32,
    /// Number of ethernet adapters
    pub ethernet: u32,
    /// Console type, e.g. `telnet` or `vnc`
    pub console: String,
}

impl Default for QemuAttributes {
    fn default() -> Self {
        Self {
            cpus: 1,
            ram: 1024,
            ethernet: 4,
            console: "telnet".to_string(),
        }
    }
}

/// A device (`<node>`) and its interfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub template: String,
    pub image: String,
    /// Icon file name, e.g. `Router.png`
    pub icon: String,
    pub position: SourcePosition,
    pub kind: NodeKind,
    pub interfaces: Vec<InterfaceRecord>,
}

impl NodeRecord {
    /// Creates a record with empty template, image and icon at the origin.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            template: String::new(),
            image: String::new(),
            icon: String::new(),
            position: SourcePosition::default(),
            kind,
            interfaces: Vec::new(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_position(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_interface(mut self, interface: InterfaceRecord) -> Self {
        self.interfaces.push(interface);
        self
    }
}

/// How an interface is wired.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceAttachment {
    /// Attached to a shared network (`type="ethernet"`)
    Shared { segment: SegmentId },
    /// Wired straight to an interface of another node (`type="serial"`)
    Direct {
        remote_node: NodeId,
        remote_interface: InterfaceId,
    },
}

/// An interface (`<interface>`) of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRecord {
    pub id: InterfaceId,
    pub name: String,
    pub attachment: InterfaceAttachment,
}

impl InterfaceRecord {
    /// Creates an interface attached to a shared segment.
    pub fn shared(
        id: impl Into<InterfaceId>,
        name: impl Into<String>,
        segment: impl Into<SegmentId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attachment: InterfaceAttachment::Shared {
                segment: segment.into(),
            },
        }
    }

    /// Creates an interface wired directly to a remote node's interface.
    pub fn direct(
        id: impl Into<InterfaceId>,
        name: impl Into<String>,
        remote_node: impl Into<NodeId>,
        remote_interface: impl Into<InterfaceId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attachment: InterfaceAttachment::Direct {
                remote_node: remote_node.into(),
                remote_interface: remote_interface.into(),
            },
        }
    }
}

/// A startup configuration for one node, already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRecord {
    pub node_id: NodeId,
    pub data: Vec<u8>,
}

/// A free-text annotation, already stripped of markup.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    pub text: String,
    pub position: SourcePosition,
}
