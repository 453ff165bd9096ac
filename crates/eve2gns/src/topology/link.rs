//! Point-to-point links and their label geometry.

use eve2gns_core::geometry::{Line, Point};

use crate::{
    canvas::Canvas,
    error::{ConvertError, Result},
    topology::{interface::InterfaceRef, node::Node},
};

/// A connection between exactly two interfaces.
///
/// The endpoints are unordered as far as the network is concerned, but they
/// are kept in insertion order so that the output is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    first: InterfaceRef,
    second: InterfaceRef,
}

impl Link {
    /// Joins two distinct interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidLink`] if both ends are the same
    /// interface.
    pub fn new(first: InterfaceRef, second: InterfaceRef) -> Result<Self> {
        if first == second {
            return Err(ConvertError::InvalidLink {
                node: second.node,
                interface: second.interface,
            });
        }
        Ok(Self { first, second })
    }

    pub fn endpoints(&self) -> (&InterfaceRef, &InterfaceRef) {
        (&self.first, &self.second)
    }
}

/// Placement of the two interface labels of a link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkLabels {
    /// Degrees, within `[-90, 90]`
    pub rotation: f64,
    /// Label of the first endpoint, relative to its node
    pub first: Point,
    /// Label of the second endpoint, relative to its node
    pub second: Point,
}

impl LinkLabels {
    /// Computes label placement along the line between two nodes' icon
    /// centers.
    ///
    /// Each label sits 15% of the way in from its own end and is expressed
    /// relative to its own node's display position.
    pub fn between(first: &Node, second: &Node, canvas: &Canvas) -> Result<Self> {
        let line = Line::new(first.icon_center(canvas)?, second.icon_center(canvas)?);
        let (near_first, near_second) = line.label_points();

        Ok(Self {
            rotation: line.rotation(),
            first: near_first - first.display_position(canvas),
            second: near_second - second.display_position(canvas),
        })
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use eve2gns_core::{
        geometry::Size,
        identifier::NodeId,
        record::{IolAttributes, NodeKind, NodeRecord, SourcePosition},
    };

    use super::*;
    use crate::topology::node::NodeDetails;

    fn node(id: &str, icon: &str, x: f64, y: f64) -> Node {
        let record = NodeRecord::new(id, id, NodeKind::Iol(IolAttributes::default()))
            .with_icon(icon)
            .with_position(SourcePosition::absolute(x, y));
        let mut node = Node::placeholder(NodeId::new(id));
        node.fill_in(NodeDetails::from(&record));
        node
    }

    fn canvas() -> Canvas {
        let size = Size::new(2000.0, 1000.0);
        Canvas::new(size, 1.0, size)
    }

    #[test]
    fn test_link_keeps_endpoint_order() {
        let link = Link::new(InterfaceRef::new("2", "0"), InterfaceRef::new("1", "16")).unwrap();
        let (first, second) = link.endpoints();
        assert_eq!(first.node.as_str(), "2");
        assert_eq!(second, &InterfaceRef::new("1", "16"));
    }

    #[test]
    fn test_link_to_itself_fails() {
        assert_eq!(
            Link::new(InterfaceRef::new("1", "0"), InterfaceRef::new("1", "0")),
            Err(ConvertError::InvalidLink {
                node: NodeId::new("1"),
                interface: "0".into(),
            })
        );
        assert!(Link::new(InterfaceRef::new("1", "0"), InterfaceRef::new("1", "1")).is_ok());
    }

    #[test]
    fn test_labels_horizontal_link() {
        let a = node("1", "Router.png", 100.0, 100.0);
        let b = node("2", "Router.png", 300.0, 100.0);
        let labels = LinkLabels::between(&a, &b, &canvas()).unwrap();

        // Centers are 200 apart; labels sit 30 in from each center, y rounds away from zero.
        assert_eq!(labels.rotation, 0.0);
        assert_eq!(labels.first, Point::new(63.0, 22.0));
        assert_eq!(labels.second, Point::new(3.0, 22.0));
    }

    #[test]
    fn test_labels_reverse_direction_stay_upright() {
        let a = node("1", "Router.png", 300.0, 100.0);
        let b = node("2", "Router.png", 100.0, 100.0);
        let labels = LinkLabels::between(&a, &b, &canvas()).unwrap();

        assert_approx_eq!(f64, labels.rotation, 0.0);
        assert_eq!(labels.first, Point::new(3.0, 22.0));
        assert_eq!(labels.second, Point::new(63.0, 22.0));
    }

    #[test]
    fn test_labels_vertical_link() {
        let a = node("1", "Switch.png", 100.0, 100.0);
        let b = node("2", "Switch.png", 100.0, 500.0);
        let labels = LinkLabels::between(&a, &b, &canvas()).unwrap();

        assert_approx_eq!(f64, labels.rotation, 90.0);
        // Centers at x + 25.5, y + 24; 15% of 400 = 60
        assert_eq!(labels.first, Point::new(25.0, 84.0));
        assert_eq!(labels.second, Point::new(25.0, -36.0));
    }

    #[test]
    fn test_labels_require_icons() {
        let a = node("1", "Router.png", 100.0, 100.0);
        let b = node("2", "Cloud.png", 300.0, 100.0);
        assert!(matches!(
            LinkLabels::between(&a, &b, &canvas()),
            Err(ConvertError::MissingIconGeometry { .. })
        ));
    }
}
