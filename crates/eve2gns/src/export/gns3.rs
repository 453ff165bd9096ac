//! The GNS3 project file (`.gns3`) document.
//!
//! Only the fields GNS3 needs to open a project are modelled. Fields are
//! declared in alphabetical order so the JSON keys come out sorted, which
//! matches the files GNS3 writes itself.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

/// Top-level project document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub auto_close: bool,
    pub auto_open: bool,
    pub auto_start: bool,
    pub name: String,
    pub project_id: Uuid,
    pub revision: u32,
    pub scene_height: i64,
    pub scene_width: i64,
    pub show_grid: bool,
    pub show_interface_labels: bool,
    pub show_layers: bool,
    pub snap_to_grid: bool,
    pub topology: ProjectTopology,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub zoom: u32,
}

impl Project {
    /// Creates a project with GNS3's defaults around the given topology.
    pub fn new(
        name: impl Into<String>,
        project_id: Uuid,
        scene_width: i64,
        scene_height: i64,
        topology: ProjectTopology,
    ) -> Self {
        Self {
            auto_close: true,
            auto_open: false,
            auto_start: false,
            name: name.into(),
            project_id,
            revision: 8,
            scene_height,
            scene_width,
            show_grid: false,
            show_interface_labels: false,
            show_layers: false,
            snap_to_grid: false,
            topology,
            kind: "topology".to_string(),
            version: "2.1.0".to_string(),
            zoom: 100,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectTopology {
    pub computes: Vec<serde_json::Value>,
    pub drawings: Vec<Drawing>,
    pub links: Vec<Link>,
    pub nodes: Vec<Node>,
}

/// Text label attached to a node or a link endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub rotation: i32,
    pub style: String,
    pub text: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub filters: BTreeMap<String, serde_json::Value>,
    pub link_id: Uuid,
    pub nodes: Vec<LinkEndpoint>,
    pub suspend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkEndpoint {
    pub adapter_number: u32,
    pub label: Label,
    pub node_id: Uuid,
    pub port_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub compute_id: String,
    pub console: u16,
    pub console_type: String,
    pub first_port_name: Option<String>,
    pub height: u32,
    pub label: Label,
    pub name: String,
    pub node_id: Uuid,
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_name_format: Option<String>,
    pub port_segment_size: u32,
    pub properties: NodeProperties,
    pub symbol: String,
    pub width: u32,
    pub x: i64,
    pub y: i64,
    pub z: i32,
}

/// Emulator specific node settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeProperties {
    Iou(IouProperties),
    Qemu(QemuProperties),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IouProperties {
    pub application_id: u32,
    pub ethernet_adapters: u32,
    pub l1_keepalives: bool,
    pub nvram: u32,
    pub path: String,
    pub ram: u32,
    pub serial_adapters: u32,
    pub use_default_iou_values: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QemuProperties {
    pub adapter_type: String,
    pub adapters: u32,
    pub cpus: u32,
    pub hda_disk_image: String,
    pub hda_disk_interface: String,
    pub options: String,
    pub platform: String,
    pub qemu_path: String,
    pub ram: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub drawing_id: Uuid,
    pub rotation: i32,
    pub svg: String,
    pub x: i64,
    pub y: i64,
    pub z: i32,
}
