//! Conversion from the raw `.unl` structure into typed lab records.

use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose};
use log::{debug, trace};

use eve2gns_core::record::{
    AnnotationRecord, ConfigRecord, InterfaceAttachment, InterfaceRecord, IolAttributes,
    LabMeta, LabRecords, NodeKind, NodeRecord, QemuAttributes, SegmentRecord, SourceCoord,
    SourcePosition,
};

use crate::{
    annotation::parse_annotation,
    error::{ParseError, Result},
    unl,
    value::parse_coordinate,
};

pub(crate) fn lab_to_records(lab: unl::Lab) -> Result<LabRecords> {
    let segments = lab
        .topology
        .networks
        .items
        .into_iter()
        .map(|network| SegmentRecord::new(network.id))
        .collect();

    let nodes = lab
        .topology
        .nodes
        .items
        .into_iter()
        .map(node_record)
        .collect::<Result<Vec<_>>>()?;

    let configs = lab
        .objects
        .configs
        .items
        .into_iter()
        .map(config_record)
        .collect::<Result<Vec<_>>>()?;

    let annotations = lab
        .objects
        .textobjects
        .items
        .into_iter()
        .map(annotation_record)
        .collect::<Result<Vec<_>>>()?;

    Ok(LabRecords {
        meta: LabMeta {
            name: lab.name,
            lab_id: lab.id,
        },
        segments,
        nodes,
        configs,
        annotations,
    })
}

fn node_record(node: unl::Node) -> Result<NodeRecord> {
    let element = format!("node {}", node.id);

    let position = SourcePosition::new(
        coordinate(&element, "left", &node.left)?,
        coordinate(&element, "top", &node.top)?,
    );

    let kind = match node.node_type.as_str() {
        "iol" => {
            let defaults = IolAttributes::default();
            NodeKind::Iol(IolAttributes {
                ethernet: number_or(&element, "ethernet", node.ethernet.as_deref(), defaults.ethernet)?,
                serial: number_or(&element, "serial", node.serial.as_deref(), defaults.serial)?,
                nvram: number_or(&element, "nvram", node.nvram.as_deref(), defaults.nvram)?,
                ram: number_or(&element, "ram", node.ram.as_deref(), defaults.ram)?,
            })
        }
        "qemu" => {
            let defaults = QemuAttributes::default();
            NodeKind::Qemu(QemuAttributes {
                cpus: number_or(&element, "cpu", node.cpu.as_deref(), defaults.cpus)?,
                ram: number_or(&element, "ram", node.ram.as_deref(), defaults.ram)?,
                ethernet: number_or(&element, "ethernet", node.ethernet.as_deref(), defaults.ethernet)?,
                console: node.console.clone().unwrap_or(defaults.console),
            })
        }
        other => {
            debug!(node_id = node.id, node_type = other; "Keeping node of unsupported type");
            NodeKind::Unsupported {
                node_type: other.to_string(),
            }
        }
    };

    let interfaces = node
        .interfaces
        .into_iter()
        .map(|interface| interface_record(&node.id, interface))
        .collect::<Result<Vec<_>>>()?;

    Ok(NodeRecord {
        id: node.id.into(),
        name: node.name,
        template: node.template,
        image: node.image,
        icon: node.icon,
        position,
        kind,
        interfaces,
    })
}

fn interface_record(node_id: &str, interface: unl::Interface) -> Result<InterfaceRecord> {
    let element = format!("interface {} of node {}", interface.id, node_id);

    let attachment = match interface.interface_type.as_str() {
        "ethernet" => InterfaceAttachment::Shared {
            segment: required(&element, "network_id", interface.network_id)?.into(),
        },
        "serial" => InterfaceAttachment::Direct {
            remote_node: required(&element, "remote_id", interface.remote_id)?.into(),
            remote_interface: required(&element, "remote_if", interface.remote_if)?.into(),
        },
        other => {
            return Err(ParseError::UnknownInterfaceType {
                element,
                interface_type: other.to_string(),
            });
        }
    };

    trace!(node_id = node_id, interface_id = interface.id; "Read interface");

    Ok(InterfaceRecord {
        id: interface.id.into(),
        name: interface.name,
        attachment,
    })
}

fn config_record(config: unl::Config) -> Result<ConfigRecord> {
    let element = format!("config for node {}", config.id);
    let data = decode_payload(&element, &config.data)?;

    Ok(ConfigRecord {
        node_id: config.id.into(),
        data,
    })
}

fn annotation_record(text_object: unl::TextObject) -> Result<AnnotationRecord> {
    let element = format!("textobject {}", text_object.id);
    let bytes = decode_payload(&element, &text_object.data)?;
    let html = String::from_utf8(bytes).map_err(|_| ParseError::AnnotationEncoding {
        element: element.clone(),
    })?;

    let annotation = parse_annotation(&html);
    let position = annotation
        .position
        .ok_or(ParseError::AnnotationPosition { element })?;

    Ok(AnnotationRecord {
        text: annotation.text,
        position,
    })
}

/// Decodes a base64 payload, ignoring the line breaks EVE-NG inserts.
fn decode_payload(element: &str, payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    general_purpose::STANDARD
        .decode(compact)
        .map_err(|source| ParseError::Payload {
            element: element.to_string(),
            source,
        })
}

fn coordinate(element: &str, attribute: &'static str, value: &str) -> Result<SourceCoord> {
    parse_coordinate(value).ok_or_else(|| ParseError::InvalidAttribute {
        element: element.to_string(),
        attribute,
        value: value.to_string(),
    })
}

fn number_or<T: FromStr>(
    element: &str,
    attribute: &'static str,
    value: Option<&str>,
    default: T,
) -> Result<T> {
    match value {
        None => Ok(default),
        Some(text) => text
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidAttribute {
                element: element.to_string(),
                attribute,
                value: text.to_string(),
            }),
    }
}

fn required(element: &str, attribute: &'static str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| ParseError::MissingAttribute {
        element: element.to_string(),
        attribute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload_ignores_line_breaks() {
        let data = decode_payload("config", "aG9zdG5h\nbWUgUjE=\n").unwrap();
        assert_eq!(data, b"hostname R1");
    }

    #[test]
    fn test_decode_payload_invalid() {
        let err = decode_payload("config for node 1", "not base64!").unwrap_err();
        assert!(matches!(err, ParseError::Payload { .. }));
    }

    #[test]
    fn test_number_or_default_and_error() {
        assert_eq!(number_or("node 1", "ram", None, 512u32).unwrap(), 512);
        assert_eq!(
            number_or("node 1", "ram", Some("2048"), 512u32).unwrap(),
            2048
        );

        let err = number_or("node 1", "ram", Some("lots"), 512u32).unwrap_err();
        assert_eq!(err.to_string(), "node 1: invalid value `lots` for attribute `ram`");
    }
}
