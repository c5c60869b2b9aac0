use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};
use uuid::Uuid;

use crate::api::blueprint_dto::BlueprintDto;
use crate::api::dockerinfo_dto::DockerInfoDto;
use crate::api::topology_dto::{LinkDto, MessageDto, NodeDto, OperationDto, TopologyDto};
use crate::domain::topology::extractor::{PendingLink, extract_operations};
use crate::domain::topology::link::{Link, LinkKey};
use crate::domain::topology::message::Message;
use crate::domain::topology::node::{Node, NodeRegistry};
use crate::domain::topology::operation::{Operation, OperationAddress, OperationKey};
use crate::domain::topology::resolver::resolve_links;
use crate::domain::utils::id::ContainerName;
use crate::error::Error;

/// The resolved call graph of a pipeline: deployed nodes, their operations,
/// and the links between operations.
///
/// Operations and links are owned here; operations refer to their node and
/// links by key, links refer to their endpoints by key.
#[derive(Debug, Clone)]
pub struct Topology {
    /// Fresh for every resolution run.
    pub run_id: Uuid,
    pub pipeline_name: Option<String>,

    pub registry: NodeRegistry,

    pub operations: SlotMap<OperationKey, Operation>,
    /// Keys to Topology.operations in blueprint declaration order
    pub operation_order: Vec<OperationKey>,
    /// `(container, operation)` -> key to Topology.operations
    pub operation_index: HashMap<OperationAddress, OperationKey>,

    pub links: SlotMap<LinkKey, Link>,
    /// Keys to Topology.links in creation order
    pub link_order: Vec<LinkKey>,

    /// Declared connections that point at no operation of the blueprint.
    pub unmatched_connections: Vec<PendingLink>,
}

impl Topology {
    /// Resolves a blueprint against a dockerinfo inventory.
    ///
    /// The graph is only returned when every phase succeeds; on error nothing
    /// built so far escapes.
    pub fn create_from_dto(blueprint: &BlueprintDto, dockerinfo: &DockerInfoDto) -> Result<Self, Error> {
        // Phase 1: Deployed nodes, checked against the blueprint
        let registry = NodeRegistry::build(dockerinfo, blueprint)?;

        // Phase 2: Operations and dangling connections
        let mut extracted = extract_operations(blueprint, &registry)?;

        // Phase 3: Join connections to their target operations
        let resolved = resolve_links(&mut extracted.operations, &extracted.order, &extracted.pending)?;

        let topology = Topology {
            run_id: Uuid::new_v4(),
            pipeline_name: blueprint.name.clone(),
            registry,
            operations: extracted.operations,
            operation_order: extracted.order,
            operation_index: extracted.index,
            links: resolved.links,
            link_order: resolved.order,
            unmatched_connections: resolved.unmatched,
        };

        tracing::info!(
            run_id = %topology.run_id,
            nodes = topology.registry.len(),
            operations = topology.operation_order.len(),
            links = topology.link_order.len(),
            "Topology resolved"
        );

        Ok(topology)
    }

    pub fn node(&self, container_name: &ContainerName) -> Option<&Node> {
        self.registry.get(container_name)
    }

    /// The deployment an operation is served from.
    pub fn node_of(&self, operation: &Operation) -> Option<&Node> {
        self.registry.get(&operation.node)
    }

    pub fn operation(&self, key: OperationKey) -> Option<&Operation> {
        self.operations.get(key)
    }

    pub fn find_operation(&self, container_name: &str, operation: &str) -> Option<OperationKey> {
        self.operation_index.get(&OperationAddress::new(container_name, operation)).copied()
    }

    /// Operations in blueprint declaration order.
    pub fn iter_operations(&self) -> impl Iterator<Item = (OperationKey, &Operation)> {
        self.operation_order.iter().map(move |key| (*key, &self.operations[*key]))
    }

    pub fn link(&self, key: LinkKey) -> Option<&Link> {
        self.links.get(key)
    }

    /// Links in creation order.
    pub fn iter_links(&self) -> impl Iterator<Item = (LinkKey, &Link)> {
        self.link_order.iter().map(move |key| (*key, &self.links[*key]))
    }

    pub fn producer(&self, link: &Link) -> Option<&Operation> {
        self.operations.get(link.producer)
    }

    pub fn consumer(&self, link: &Link) -> Option<&Operation> {
        self.operations.get(link.consumer)
    }

    /// Operations nothing feeds into; these start the pipeline.
    pub fn entry_operations(&self) -> Vec<OperationKey> {
        self.iter_operations().filter(|(_, op)| op.incoming.is_empty()).map(|(key, _)| key).collect()
    }

    /// Operations whose output goes nowhere.
    pub fn exit_operations(&self) -> Vec<OperationKey> {
        self.iter_operations().filter(|(_, op)| op.outgoing.is_empty()).map(|(key, _)| key).collect()
    }

    /// Serializable form with positional references. Does not include the
    /// run id, so two runs over the same documents compare equal.
    pub fn to_dto(&self) -> TopologyDto {
        let mut operation_position: SecondaryMap<OperationKey, usize> = SecondaryMap::new();
        for (position, key) in self.operation_order.iter().enumerate() {
            operation_position.insert(*key, position);
        }

        let mut link_position: SecondaryMap<LinkKey, usize> = SecondaryMap::new();
        for (position, key) in self.link_order.iter().enumerate() {
            link_position.insert(*key, position);
        }

        let nodes = self
            .registry
            .iter()
            .map(|node| NodeDto {
                container_name: node.container_name.to_string(),
                host: node.host.clone(),
                port: node.port,
                proto_uri: node.proto_uri.clone(),
            })
            .collect();

        let operations = self
            .iter_operations()
            .map(|(_, op)| OperationDto {
                container_name: op.node.to_string(),
                operation_name: op.name.to_string(),
                input: message_dto(&op.input),
                output: message_dto(&op.output),
                incoming: op.incoming.iter().map(|key| link_position[*key]).collect(),
                outgoing: op.outgoing.iter().map(|key| link_position[*key]).collect(),
            })
            .collect();

        let links = self
            .iter_links()
            .map(|(_, link)| LinkDto {
                producer: operation_position[link.producer],
                consumer: operation_position[link.consumer],
                message_name: link.message_name.clone(),
            })
            .collect();

        TopologyDto { pipeline: self.pipeline_name.clone(), nodes, operations, links }
    }

    /// Logs an overview of the resolved graph.
    pub fn print_summary(&self) {
        log::info!("--- Topology Summary ---");
        log::info!("Pipeline: {}", self.pipeline_name.as_deref().unwrap_or("<unnamed>"));
        log::info!("Run: {}", self.run_id);
        log::info!("Nodes: {}, Operations: {}, Links: {}", self.registry.len(), self.operation_order.len(), self.link_order.len());

        for node in self.registry.iter() {
            log::info!("  - Node '{}' at {}", node.container_name, node.address());

            for (_, op) in self.iter_operations().filter(|(_, op)| op.node == node.container_name) {
                log::info!(
                    "    * {}({}{}) -> {}{} [in: {}, out: {}]",
                    op.name,
                    if op.input.stream { "stream " } else { "" },
                    op.input.name,
                    if op.output.stream { "stream " } else { "" },
                    op.output.name,
                    op.incoming.len(),
                    op.outgoing.len()
                );
            }
        }

        for (_, link) in self.iter_links() {
            if let (Some(producer), Some(consumer)) = (self.producer(link), self.consumer(link)) {
                log::debug!("    {} --{}--> {}", producer.address(), link.message_name, consumer.address());
            }
        }

        for pending in &self.unmatched_connections {
            log::warn!("Unlinked connection {} -> {}", pending.producer_address, pending.target);
        }
        log::info!("------------------------");
    }
}

fn message_dto(message: &Message) -> MessageDto {
    MessageDto { name: message.name.clone(), stream: message.stream }
}
