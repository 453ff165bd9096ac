//! Devices and their rendering geometry.

use indexmap::IndexMap;

use eve2gns_core::{
    geometry::{Point, Size},
    identifier::{InterfaceId, NodeId},
    record::{NodeKind, NodeRecord, SourcePosition},
};

use crate::{
    canvas::Canvas,
    error::{ConvertError, Result},
    topology::interface::{Attachment, Interface},
};

/// Label offset for nodes without a role.
const DEFAULT_LABEL_OFFSET: Point = Point::new(0.0, -25.0);

/// Symbol for nodes without a role.
const DEFAULT_ICON: Icon = Icon {
    size: Size::new(65.0, 53.0),
    symbol: ":/symbols/computer.svg",
};

/// Device role, derived from the EVE-NG icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Router,
    Switch,
}

impl Role {
    /// Derives the role from an icon file name, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eve2gns::topology::Role;
    /// assert_eq!(Role::from_icon("Router.png"), Some(Role::Router));
    /// assert_eq!(Role::from_icon("Switch L3.png"), Some(Role::Switch));
    /// assert_eq!(Role::from_icon("Server.png"), None);
    /// ```
    pub fn from_icon(icon: &str) -> Option<Self> {
        let icon = icon.to_ascii_lowercase();
        if icon.contains("router") {
            Some(Role::Router)
        } else if icon.contains("switch") {
            Some(Role::Switch)
        } else {
            None
        }
    }

    /// Size and symbol of the GNS3 icon for this role.
    pub fn icon(self) -> Icon {
        match self {
            Role::Router => Icon {
                size: Size::new(66.0, 45.0),
                symbol: ":/symbols/router.svg",
            },
            Role::Switch => Icon {
                size: Size::new(51.0, 48.0),
                symbol: ":/symbols/multilayer_switch.svg",
            },
        }
    }

    /// Position of the node label relative to the node.
    pub fn label_offset(self) -> Point {
        match self {
            Role::Router => Point::new(13.0, -25.0),
            Role::Switch => Point::new(-12.0, -25.0),
        }
    }
}

/// A GNS3 node symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icon {
    pub size: Size,
    pub symbol: &'static str,
}

/// Fields read from a node's own record.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDetails {
    pub name: String,
    pub template: String,
    pub image: String,
    pub icon: String,
    pub position: SourcePosition,
    pub kind: NodeKind,
}

impl From<&NodeRecord> for NodeDetails {
    fn from(record: &NodeRecord) -> Self {
        Self {
            name: record.name.clone(),
            template: record.template.clone(),
            image: record.image.clone(),
            icon: record.icon.clone(),
            position: record.position,
            kind: record.kind.clone(),
        }
    }
}

/// A simulated network device.
///
/// A node starts out as a placeholder when a serial link on another node
/// names it before its own record is read; [`Node::fill_in`] completes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    details: Option<NodeDetails>,
    interfaces: IndexMap<InterfaceId, Interface>,
    config: Option<Vec<u8>>,
}

impl Node {
    /// Creates a node known only by its id.
    pub fn placeholder(id: NodeId) -> Self {
        Self {
            id,
            details: None,
            interfaces: IndexMap::new(),
            config: None,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn is_placeholder(&self) -> bool {
        self.details.is_none()
    }

    /// Sets the node's own fields. Returns `true` if the node already had
    /// details, which are replaced.
    pub fn fill_in(&mut self, details: NodeDetails) -> bool {
        self.details.replace(details).is_some()
    }

    /// The node's own fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnknownNodeReference`] for a placeholder.
    pub fn details(&self) -> Result<&NodeDetails> {
        self.details
            .as_ref()
            .ok_or_else(|| ConvertError::UnknownNodeReference {
                node: self.id.clone(),
            })
    }

    /// Interfaces in creation order.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    /// Registers a new interface on this node.
    ///
    /// Attaching the interface to its segment is up to the caller, which
    /// owns the segments.
    pub fn create_interface(
        &mut self,
        id: InterfaceId,
        name: Option<String>,
        attachment: Attachment,
    ) -> &mut Interface {
        let interface = Interface::new(id.clone(), self.id.clone(), name, attachment);
        let (index, _) = self.interfaces.insert_full(id, interface);
        &mut self.interfaces[index]
    }

    /// Looks up an interface by id.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingInterface`] if the node has no such
    /// interface.
    pub fn get_interface(&self, id: &InterfaceId) -> Result<&Interface> {
        self.interfaces
            .get(id)
            .ok_or_else(|| self.missing_interface(id))
    }

    pub(crate) fn get_interface_mut(&mut self, id: &InterfaceId) -> Result<&mut Interface> {
        let missing = self.missing_interface(id);
        self.interfaces.get_mut(id).ok_or(missing)
    }

    fn missing_interface(&self, id: &InterfaceId) -> ConvertError {
        ConvertError::MissingInterface {
            node: self.id.clone(),
            interface: id.clone(),
        }
    }

    /// Startup configuration attached to this node.
    pub fn config(&self) -> Option<&[u8]> {
        self.config.as_deref()
    }

    /// Attaches a startup configuration. Returns `true` if one was replaced.
    pub(crate) fn set_config(&mut self, data: Vec<u8>) -> bool {
        self.config.replace(data).is_some()
    }

    /// Role derived from the icon; placeholders have none.
    pub fn role(&self) -> Option<Role> {
        self.details
            .as_ref()
            .and_then(|details| Role::from_icon(&details.icon))
    }

    /// Position in display coordinates. Placeholders sit at the origin.
    pub fn display_position(&self, canvas: &Canvas) -> Point {
        let position = self
            .details
            .as_ref()
            .map(|details| details.position)
            .unwrap_or_default();
        canvas.transform(position)
    }

    /// GNS3 icon of this node. Nodes without a role get a generic symbol.
    pub fn icon(&self) -> Icon {
        self.role().map(Role::icon).unwrap_or(DEFAULT_ICON)
    }

    /// Center of the icon in display coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingIconGeometry`] for a node without a
    /// role.
    pub fn icon_center(&self, canvas: &Canvas) -> Result<Point> {
        let role = self
            .role()
            .ok_or_else(|| ConvertError::MissingIconGeometry {
                node: self.id.clone(),
                icon: self
                    .details
                    .as_ref()
                    .map(|details| details.icon.clone())
                    .unwrap_or_default(),
            })?;
        Ok(self.display_position(canvas) + role.icon().size.half())
    }

    pub fn label_offset(&self) -> Point {
        self.role()
            .map(Role::label_offset)
            .unwrap_or(DEFAULT_LABEL_OFFSET)
    }
}
