use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::topology::node::Node;
use crate::domain::topology::topology::Topology;
use crate::error::Result;

pub const LINK_TABLE_HEADERS: [&str; 12] = [
    "link",
    "message",
    "producer_container",
    "producer_host",
    "producer_port",
    "producer_operation",
    "producer_stream",
    "consumer_container",
    "consumer_host",
    "consumer_port",
    "consumer_operation",
    "consumer_stream",
];

/// Writes one `;`-separated row per link, with both endpoints' deployment
/// address, in link creation order. This is the wiring the execution
/// runtime needs to create one queue per link.
pub fn write_link_table<W: Write>(topology: &Topology, writer: W) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    csv_wtr.write_record(LINK_TABLE_HEADERS)?;

    for (position, (_, link)) in topology.iter_links().enumerate() {
        let (Some(producer), Some(consumer)) = (topology.producer(link), topology.consumer(link)) else {
            log::error!("Link {} references an operation missing from the topology; skipped.", position);
            continue;
        };
        let (producer_host, producer_port) = location(topology.node_of(producer));
        let (consumer_host, consumer_port) = location(topology.node_of(consumer));

        csv_wtr.write_record([
            position.to_string(),
            link.message_name.clone(),
            producer.node.to_string(),
            producer_host,
            producer_port,
            producer.name.to_string(),
            producer.output.stream.to_string(),
            consumer.node.to_string(),
            consumer_host,
            consumer_port,
            consumer.name.to_string(),
            consumer.input.stream.to_string(),
        ])?;
    }

    csv_wtr.flush()?;
    Ok(())
}

pub fn write_link_table_file(topology: &Topology, file_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(file_path.as_ref())?;
    write_link_table(topology, file)
}

fn location(node: Option<&Node>) -> (String, String) {
    match node {
        Some(node) => (node.host.clone(), node.port.to_string()),
        None => ("NA".to_string(), "NA".to_string()),
    }
}
