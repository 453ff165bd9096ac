//! Shared broadcast segments (EVE-NG networks).

use eve2gns_core::identifier::SegmentId;

use crate::{
    error::{ConvertError, Result},
    topology::interface::InterfaceRef,
};

/// A multi-access network that interfaces attach to.
///
/// Only point-to-point segments can be represented in GNS3, so a segment is
/// turned into at most one link once every node has been read.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    id: SegmentId,
    interfaces: Vec<InterfaceRef>,
}

impl Segment {
    pub fn new(id: SegmentId) -> Self {
        Self {
            id,
            interfaces: Vec::new(),
        }
    }

    pub fn id(&self) -> &SegmentId {
        &self.id
    }

    /// Attached interfaces in attachment order.
    pub fn interfaces(&self) -> &[InterfaceRef] {
        &self.interfaces
    }

    pub(crate) fn attach(&mut self, interface: InterfaceRef) {
        self.interfaces.push(interface);
    }

    /// The two endpoints of the link this segment stands for.
    ///
    /// An empty segment yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnsupportedSegmentArity`] when one or more
    /// than two interfaces are attached.
    pub fn resolve(&self) -> Result<Option<(InterfaceRef, InterfaceRef)>> {
        match self.interfaces.as_slice() {
            [] => Ok(None),
            [first, second] => Ok(Some((first.clone(), second.clone()))),
            other => Err(ConvertError::UnsupportedSegmentArity {
                segment: self.id.clone(),
                count: other.len(),
            }),
        }
    }
}
