//! Name-based identifiers for generated GNS3 objects.
//!
//! Ids are UUID v5, derived from the lab and the source identity of each
//! object, so converting the same lab twice yields the same project.

use uuid::Uuid;

use eve2gns_core::{identifier::NodeId, record::LabMeta};

use crate::topology::InterfaceRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IdGenerator {
    project: Uuid,
}

impl IdGenerator {
    pub fn for_lab(meta: &LabMeta) -> Self {
        let name = match &meta.lab_id {
            Some(lab_id) => format!("eve2gns:lab:{}:{}", meta.name, lab_id),
            None => format!("eve2gns:lab:{}", meta.name),
        };
        Self {
            project: Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()),
        }
    }

    pub fn project(&self) -> Uuid {
        self.project
    }

    pub fn node(&self, id: &NodeId) -> Uuid {
        self.derive(&format!("node:{id}"))
    }

    pub fn link(&self, first: &InterfaceRef, second: &InterfaceRef) -> Uuid {
        self.derive(&format!(
            "link:{}/{}:{}/{}",
            first.node, first.interface, second.node, second.interface
        ))
    }

    pub fn drawing(&self, index: usize) -> Uuid {
        self.derive(&format!("drawing:{index}"))
    }

    fn derive(&self, name: &str) -> Uuid {
        Uuid::new_v5(&self.project, name.as_bytes())
    }
}
