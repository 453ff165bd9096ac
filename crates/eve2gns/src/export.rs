//! GNS3 project export.
//!
//! [`Exporter`] walks a frozen [`Topology`] and produces the [`gns3::Project`]
//! document. All coordinates go through the topology's canvas.

pub mod gns3;

mod svg;

use std::collections::BTreeMap;

use log::{debug, info};

use eve2gns_core::record::NodeKind;

use crate::{
    config::AppConfig,
    error::{ConvertError, Result},
    ids::IdGenerator,
    topology::{Drawing, Link, LinkLabels, Node, Topology},
};

/// IOU interfaces are grouped four to an adapter.
const IOU_PORT_SEGMENT_SIZE: u32 = 4;
const IOU_PORT_NAME_FORMAT: &str = "Ethernet{segment0}/{port0}";
const COMPUTE_ID: &str = "vm";

/// Builds GNS3 documents from topologies.
pub struct Exporter<'a> {
    config: &'a AppConfig,
}

impl<'a> Exporter<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Exports the whole project.
    ///
    /// Nodes, links and drawings keep their insertion order.
    ///
    /// # Errors
    ///
    /// Fails on the first node, interface or link that cannot be
    /// represented in GNS3.
    pub fn export(&self, topology: &Topology) -> Result<gns3::Project> {
        let ids = IdGenerator::for_lab(topology.meta());

        let nodes = topology
            .nodes()
            .enumerate()
            .map(|(index, node)| self.export_node(topology, &ids, index, node))
            .collect::<Result<Vec<_>>>()?;

        let links = topology
            .links()
            .iter()
            .map(|link| self.export_link(topology, &ids, link))
            .collect::<Result<Vec<_>>>()?;

        let drawings = topology
            .drawings()
            .iter()
            .map(|drawing| self.export_drawing(topology, &ids, drawing))
            .collect();

        let size = topology.canvas().size().round();
        let project = gns3::Project::new(
            topology.name(),
            ids.project(),
            size.width() as i64,
            size.height() as i64,
            gns3::ProjectTopology {
                computes: Vec::new(),
                drawings,
                links,
                nodes,
            },
        );

        info!(
            nodes = project.topology.nodes.len(),
            links = project.topology.links.len(),
            drawings = project.topology.drawings.len();
            "Project exported"
        );
        Ok(project)
    }

    fn export_node(
        &self,
        topology: &Topology,
        ids: &IdGenerator,
        index: usize,
        node: &Node,
    ) -> Result<gns3::Node> {
        let details = node.details()?;
        let icon = node.icon();
        let (x, y) = node.display_position(topology.canvas()).to_int_pair();
        let (label_x, label_y) = node.label_offset().to_int_pair();
        let console = self.console_port(node, index)?;

        let label = gns3::Label {
            rotation: 0,
            style: self.config.style().label_style(),
            text: details.name.clone(),
            x: label_x,
            y: label_y,
        };

        let (node_type, console_type, port_name_format, port_segment_size, properties) =
            match &details.kind {
                NodeKind::Iol(attributes) => (
                    "iou",
                    "telnet".to_string(),
                    Some(IOU_PORT_NAME_FORMAT.to_string()),
                    IOU_PORT_SEGMENT_SIZE,
                    gns3::NodeProperties::Iou(gns3::IouProperties {
                        application_id: index as u32 + 1,
                        ethernet_adapters: attributes.ethernet,
                        l1_keepalives: false,
                        nvram: attributes.nvram,
                        path: details.image.clone(),
                        ram: attributes.ram,
                        serial_adapters: attributes.serial,
                        use_default_iou_values: false,
                    }),
                ),
                NodeKind::Qemu(attributes) => (
                    "qemu",
                    attributes.console.clone(),
                    None,
                    0,
                    gns3::NodeProperties::Qemu(gns3::QemuProperties {
                        adapter_type: "e1000".to_string(),
                        adapters: attributes.ethernet,
                        cpus: attributes.cpus,
                        hda_disk_image: details.image.clone(),
                        hda_disk_interface: "virtio".to_string(),
                        options: "-nographic".to_string(),
                        platform: "x86_64".to_string(),
                        qemu_path: "/usr/bin/qemu-system-x86_64".to_string(),
                        ram: attributes.ram,
                    }),
                ),
                NodeKind::Unsupported { node_type } => {
                    return Err(ConvertError::UnsupportedNodeType {
                        node: node.id().clone(),
                        node_type: node_type.clone(),
                    });
                }
            };

        debug!(node_id = node.id().as_str(), node_type, console; "Node exported");

        Ok(gns3::Node {
            compute_id: COMPUTE_ID.to_string(),
            console,
            console_type,
            first_port_name: None,
            height: icon.size.height() as u32,
            label,
            name: details.name.clone(),
            node_id: ids.node(node.id()),
            node_type: node_type.to_string(),
            port_name_format,
            port_segment_size,
            properties,
            symbol: icon.symbol.to_string(),
            width: icon.size.width() as u32,
            x,
            y,
            z: 1,
        })
    }

    /// Console port of the node at `index`: start port plus index.
    fn console_port(&self, node: &Node, index: usize) -> Result<u16> {
        let start = self.config.console().start_port();
        u16::try_from(index)
            .ok()
            .and_then(|offset| start.checked_add(offset))
            .ok_or_else(|| ConvertError::ConsolePortRange {
                node: node.id().clone(),
                start,
            })
    }

    fn export_link(
        &self,
        topology: &Topology,
        ids: &IdGenerator,
        link: &Link,
    ) -> Result<gns3::Link> {
        let (first, second) = link.endpoints();

        let first_node = topology.node(&first.node)?;
        let second_node = topology.node(&second.node)?;
        let labels = LinkLabels::between(first_node, second_node, topology.canvas())?;
        // GNS3 wants whole degrees.
        let rotation = labels.rotation as i32;

        let mut endpoints = Vec::with_capacity(2);
        for (endpoint, node, label_position) in [
            (first, first_node, labels.first),
            (second, second_node, labels.second),
        ] {
            let interface = topology.interface(endpoint)?;
            let (adapter_number, port_number) = interface.adapter_port()?;
            let (x, y) = label_position.to_int_pair();

            endpoints.push(gns3::LinkEndpoint {
                adapter_number,
                label: gns3::Label {
                    rotation,
                    style: self.config.style().label_style(),
                    text: interface.name().unwrap_or_default().to_string(),
                    x,
                    y,
                },
                node_id: ids.node(node.id()),
                port_number,
            });
        }

        Ok(gns3::Link {
            filters: BTreeMap::new(),
            link_id: ids.link(first, second),
            nodes: endpoints,
            suspend: false,
        })
    }

    fn export_drawing(
        &self,
        topology: &Topology,
        ids: &IdGenerator,
        drawing: &Drawing,
    ) -> gns3::Drawing {
        let (x, y) = drawing.display_position(topology.canvas()).to_int_pair();

        gns3::Drawing {
            drawing_id: ids.drawing(drawing.index()),
            rotation: 0,
            svg: svg::render_text(drawing.lines(), self.config.style()),
            x,
            y,
            z: 1,
        }
    }
}

/// Serializes a project with four-space indentation.
pub fn to_json(project: &gns3::Project) -> std::result::Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    serde::Serialize::serialize(project, &mut serializer)?;
    // serde_json only writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use eve2gns_core::record::{
        InterfaceRecord, IolAttributes, LabMeta, LabRecords, NodeRecord, QemuAttributes,
        SegmentRecord, SourcePosition,
    };

    use super::*;
    use crate::config::{CanvasConfig, ConsoleConfig, StyleConfig};

    fn records(nodes: Vec<NodeRecord>) -> LabRecords {
        LabRecords {
            meta: LabMeta::new("lab"),
            segments: vec![SegmentRecord::new("1")],
            nodes,
            ..LabRecords::default()
        }
    }

    fn export(records: &LabRecords, config: &AppConfig) -> Result<gns3::Project> {
        let topology = Topology::from_records(records, config)?;
        Exporter::new(config).export(&topology)
    }

    fn router(id: &str, name: &str, x: f64) -> NodeRecord {
        NodeRecord::new(id, name, NodeKind::Iol(IolAttributes::default()))
            .with_icon("Router.png")
            .with_image("i86bi-linux-l3.bin")
            .with_position(SourcePosition::absolute(x, 300.0))
    }

    #[test]
    fn test_export_iou_node() {
        let project =
            export(&records(vec![router("1", "R1", 400.0)]), &AppConfig::default()).unwrap();
        let node = &project.topology.nodes[0];

        assert_eq!(node.node_type, "iou");
        assert_eq!(node.console, 5000);
        assert_eq!((node.x, node.y), (-600, -200));
        assert_eq!((node.width, node.height), (66, 45));
        assert_eq!(node.symbol, ":/symbols/router.svg");
        assert_eq!((node.label.x, node.label.y), (13, -25));
        assert_eq!(node.port_name_format.as_deref(), Some("Ethernet{segment0}/{port0}"));
        assert_eq!(node.port_segment_size, 4);
        match &node.properties {
            gns3::NodeProperties::Iou(properties) => {
                assert_eq!(properties.path, "i86bi-linux-l3.bin");
                assert_eq!(properties.ethernet_adapters, 1);
            }
            other => panic!("unexpected properties {other:?}"),
        }
    }

    #[test]
    fn test_export_qemu_node() {
        let qemu = NodeRecord::new(
            "2",
            "vIOS",
            NodeKind::Qemu(QemuAttributes {
                cpus: 2,
                ram: 2048,
                ethernet: 8,
                console: "vnc".to_string(),
            }),
        )
        .with_icon("Switch.png")
        .with_image("vios-15.6");

        let project = export(&records(vec![qemu]), &AppConfig::default()).unwrap();
        let node = &project.topology.nodes[0];

        assert_eq!(node.node_type, "qemu");
        assert_eq!(node.console_type, "vnc");
        assert_eq!(node.port_name_format, None);
        assert_eq!((node.label.x, node.label.y), (-12, -25));
        match &node.properties {
            gns3::NodeProperties::Qemu(properties) => {
                assert_eq!(properties.cpus, 2);
                assert_eq!(properties.adapters, 8);
                assert_eq!(properties.hda_disk_image, "vios-15.6");
            }
            other => panic!("unexpected properties {other:?}"),
        }
    }

    #[test]
    fn test_export_node_without_role() {
        let server = NodeRecord::new(
            "2",
            "SRV",
            NodeKind::Qemu(QemuAttributes {
                cpus: 1,
                ram: 1024,
                ethernet: 1,
                console: "vnc".to_string(),
            }),
        )
        .with_icon("Server.png")
        .with_image("linux-debian-12");

        let project = export(
            &records(vec![router("1", "R1", 100.0), server]),
            &AppConfig::default(),
        )
        .unwrap();
        let node = &project.topology.nodes[1];

        assert_eq!(node.name, "SRV");
        assert_eq!(node.node_type, "qemu");
        assert_eq!(node.symbol, ":/symbols/computer.svg");
        assert_eq!((node.width, node.height), (65, 53));
        assert_eq!((node.label.x, node.label.y), (0, -25));
        assert_eq!(node.console, 5001);
    }

    #[test]
    fn test_link_to_node_without_role() {
        let server = NodeRecord::new("2", "SRV", NodeKind::Iol(IolAttributes::default()))
            .with_icon("Server.png")
            .with_interface(InterfaceRecord::shared("0", "e0/0", "1"));
        let nodes = vec![
            router("1", "R1", 100.0).with_interface(InterfaceRecord::shared("0", "e0/0", "1")),
            server,
        ];

        assert_eq!(
            export(&records(nodes), &AppConfig::default()),
            Err(ConvertError::MissingIconGeometry {
                node: "2".into(),
                icon: "Server.png".to_string(),
            })
        );
    }

    #[test]
    fn test_console_ports_count_up_from_start() {
        let config = AppConfig::new(
            CanvasConfig::default(),
            ConsoleConfig::new(32768),
            StyleConfig::default(),
        );
        let project = export(
            &records(vec![router("1", "R1", 100.0), router("2", "R2", 300.0)]),
            &config,
        )
        .unwrap();

        let consoles: Vec<u16> = project.topology.nodes.iter().map(|n| n.console).collect();
        assert_eq!(consoles, vec![32768, 32769]);
    }

    #[test]
    fn test_console_port_overflow() {
        let config = AppConfig::default().with_console_start_port(u16::MAX);
        let err = export(
            &records(vec![router("1", "R1", 100.0), router("2", "R2", 300.0)]),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::ConsolePortRange { start: u16::MAX, .. }));
    }

    #[test]
    fn test_unsupported_node_type() {
        let node = NodeRecord::new(
            "3",
            "PC",
            NodeKind::Unsupported {
                node_type: "vpcs".to_string(),
            },
        )
        .with_icon("Router.png");

        assert_eq!(
            export(&records(vec![node]), &AppConfig::default()),
            Err(ConvertError::UnsupportedNodeType {
                node: "3".into(),
                node_type: "vpcs".to_string(),
            })
        );
    }

    #[test]
    fn test_link_endpoints_and_labels() {
        let nodes = vec![
            router("1", "R1", 100.0).with_interface(InterfaceRecord::shared("0", "e0/0", "1")),
            router("2", "R2", 300.0).with_interface(InterfaceRecord::shared("16", "e1/0", "1")),
        ];
        let project = export(&records(nodes), &AppConfig::default()).unwrap();

        let link = &project.topology.links[0];
        assert_eq!(link.nodes.len(), 2);

        let (first, second) = (&link.nodes[0], &link.nodes[1]);
        assert_eq!((first.adapter_number, first.port_number), (0, 0));
        assert_eq!((second.adapter_number, second.port_number), (1, 0));
        assert_eq!(first.node_id, project.topology.nodes[0].node_id);
        assert_eq!(second.node_id, project.topology.nodes[1].node_id);
        assert_eq!(first.label.text, "e0/0");
        assert_eq!(first.label.rotation, 0);
        assert_eq!((first.label.x, first.label.y), (63, 22));
        assert_eq!((second.label.x, second.label.y), (3, 22));
    }

    #[test]
    fn test_link_with_malformed_interface_name() {
        let nodes = vec![
            router("1", "R1", 100.0).with_interface(InterfaceRecord::shared("0", "Gi0/0/0", "1")),
            router("2", "R2", 300.0).with_interface(InterfaceRecord::shared("0", "e0/0", "1")),
        ];
        assert_eq!(
            export(&records(nodes), &AppConfig::default()),
            Err(ConvertError::MalformedInterfaceName {
                node: "1".into(),
                interface: "0".into(),
                name: "Gi0/0/0".to_string(),
            })
        );
    }

    #[test]
    fn test_to_json_uses_four_space_indent() {
        let project = export(&records(vec![]), &AppConfig::default()).unwrap();
        let json = to_json(&project).unwrap();

        assert!(json.starts_with("{\n    \"auto_close\": true,"));
        assert!(json.contains("\"type\": \"topology\""));
        assert!(json.contains("\"scene_width\": 2000"));
    }
}
