//! Interfaces and their adapter/port naming.

use winnow::{
    ModalResult, Parser as _,
    ascii::{alpha1, dec_uint},
};

use eve2gns_core::identifier::{InterfaceId, NodeId, SegmentId};

use crate::error::{ConvertError, Result};

/// Address of an interface: its owning node plus its node-local id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceRef {
    pub node: NodeId,
    pub interface: InterfaceId,
}

impl InterfaceRef {
    pub fn new(node: impl Into<NodeId>, interface: impl Into<InterfaceId>) -> Self {
        Self {
            node: node.into(),
            interface: interface.into(),
        }
    }
}

/// How an interface is connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Member of a shared segment, resolved into a link later
    Shared(SegmentId),
    /// Wired to the interface of another node
    Direct(InterfaceRef),
}

/// An endpoint owned by exactly one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    id: InterfaceId,
    node: NodeId,
    /// Unknown for the remote side of a serial link until its own record is read
    name: Option<String>,
    attachment: Attachment,
    /// Index into the topology's links
    link: Option<usize>,
}

impl Interface {
    pub(crate) fn new(
        id: InterfaceId,
        node: NodeId,
        name: Option<String>,
        attachment: Attachment,
    ) -> Self {
        Self {
            id,
            node,
            name,
            attachment,
            link: None,
        }
    }

    pub fn id(&self) -> &InterfaceId {
        &self.id
    }

    /// Id of the owning node.
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    /// The shared segment this interface belongs to, if any.
    pub fn segment(&self) -> Option<&SegmentId> {
        match &self.attachment {
            Attachment::Shared(segment) => Some(segment),
            Attachment::Direct(_) => None,
        }
    }

    /// The interface this one is wired to, if it is a direct attachment.
    pub fn remote(&self) -> Option<&InterfaceRef> {
        match &self.attachment {
            Attachment::Shared(_) => None,
            Attachment::Direct(remote) => Some(remote),
        }
    }

    /// Index of the link this interface is part of.
    pub fn link(&self) -> Option<usize> {
        self.link
    }

    pub fn to_ref(&self) -> InterfaceRef {
        InterfaceRef::new(self.node.clone(), self.id.clone())
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        if name.is_some() {
            self.name = name;
        }
    }

    pub(crate) fn connect_to(&mut self, remote: InterfaceRef) {
        self.attachment = Attachment::Direct(remote);
    }

    pub(crate) fn set_link(&mut self, link: usize) {
        self.link = Some(link);
    }

    /// Adapter and port numbers encoded in the interface name.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MalformedInterfaceName`] when the name is
    /// unknown or not of the form `<letters><adapter>/<port>`.
    pub fn adapter_port(&self) -> Result<(u32, u32)> {
        self.name
            .as_deref()
            .and_then(parse_adapter_port)
            .ok_or_else(|| ConvertError::MalformedInterfaceName {
                node: self.node.clone(),
                interface: self.id.clone(),
                name: self.name.clone().unwrap_or_default(),
            })
    }
}

fn adapter_port(input: &mut &str) -> ModalResult<(u32, u32)> {
    let (_, adapter, _, port) = (alpha1, dec_uint, '/', dec_uint).parse_next(input)?;
    Ok((adapter, port))
}

/// Parses an interface name such as `Ethernet2/3` or `e0/1` into its
/// `(adapter, port)` numbers.
///
/// # Examples
///
/// ```
/// # use eve2gns::topology::parse_adapter_port;
/// assert_eq!(parse_adapter_port("Ethernet2/3"), Some((2, 3)));
/// assert_eq!(parse_adapter_port("e0/1"), Some((0, 1)));
/// assert_eq!(parse_adapter_port("Gi0/0/1"), None);
/// ```
pub fn parse_adapter_port(name: &str) -> Option<(u32, u32)> {
    adapter_port.parse(name).ok()
}
