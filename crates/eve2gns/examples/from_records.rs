//! Example: Converting a lab built from records
//!
//! This example shows how to assemble a lab programmatically from the
//! record types, without reading a `.unl` file, and export it to GNS3.

use eve2gns::{
    ConverterBuilder,
    record::{
        InterfaceRecord, IolAttributes, LabMeta, LabRecords, NodeKind, NodeRecord,
        QemuAttributes, SegmentRecord, SourcePosition,
    },
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building lab from records...\n");

    let router = NodeRecord::new("1", "R1", NodeKind::Iol(IolAttributes::default()))
        .with_image("i86bi-linux-l3.bin")
        .with_icon("Router.png")
        .with_position(SourcePosition::absolute(300.0, 200.0))
        .with_interface(InterfaceRecord::shared("0", "e0/0", "1"))
        .with_interface(InterfaceRecord::direct("16", "s1/0", "3", "16"));

    let switch = NodeRecord::new("2", "SW1", NodeKind::Qemu(QemuAttributes::default()))
        .with_image("viosl2-15.2")
        .with_icon("Switch.png")
        .with_position(SourcePosition::absolute(700.0, 200.0))
        .with_interface(InterfaceRecord::shared("0", "Gi0/0", "1"));

    // The serial peer of R1; its interface only needs a name here
    let peer = NodeRecord::new("3", "R3", NodeKind::Iol(IolAttributes::default()))
        .with_image("i86bi-linux-l3.bin")
        .with_icon("Router.png")
        .with_position(SourcePosition::absolute(500.0, 500.0))
        .with_interface(InterfaceRecord::direct("16", "s1/0", "1", "16"));

    let records = LabRecords {
        meta: LabMeta::new("from-records"),
        segments: vec![SegmentRecord::new("1")],
        nodes: vec![router, switch, peer],
        ..LabRecords::default()
    };

    let builder = ConverterBuilder::default();
    let topology = builder.convert(&records)?;

    println!("Topology '{}':", topology.name());
    for node in topology.nodes() {
        let details = node.details()?;
        println!(
            "  node {} ({}) with {} interface(s)",
            node.id(),
            details.name,
            node.interfaces().count()
        );
    }
    println!("  {} link(s)\n", topology.links().len());

    let json = builder.render_json(&topology)?;
    println!("{json}");

    Ok(())
}
