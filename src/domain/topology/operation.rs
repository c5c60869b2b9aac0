use std::fmt;

use slotmap::new_key_type;

use crate::domain::topology::link::LinkKey;
use crate::domain::topology::message::Message;
use crate::domain::utils::id::{ContainerName, OperationName};

new_key_type! {
    pub struct OperationKey;
}

/// `(container, operation)` pair under which an operation is addressed by
/// `connected_to` declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationAddress {
    pub container_name: ContainerName,
    pub operation: OperationName,
}

impl OperationAddress {
    pub fn new(container_name: impl Into<String>, operation: impl Into<String>) -> Self {
        OperationAddress { container_name: ContainerName::new(container_name), operation: OperationName::new(operation) }
    }
}

impl fmt::Display for OperationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.container_name, self.operation)
    }
}

/// One remote operation exposed by a node.
#[derive(Debug, Clone)]
pub struct Operation {
    /// Key to the NodeRegistry
    pub node: ContainerName,
    pub name: OperationName,
    pub input: Message,
    pub output: Message,

    /// Keys to Topology.links, filled in by the link resolver only.
    pub incoming: Vec<LinkKey>,
    pub outgoing: Vec<LinkKey>,
}

impl Operation {
    pub fn new(node: ContainerName, name: OperationName, input: Message, output: Message) -> Self {
        Operation { node, name, input, output, incoming: Vec::new(), outgoing: Vec::new() }
    }

    pub fn address(&self) -> OperationAddress {
        OperationAddress { container_name: self.node.clone(), operation: self.name.clone() }
    }

    /// Operations fed by the `Empty` message have no upstream; all others have exactly one.
    pub fn expected_incoming(&self) -> usize {
        if self.input.is_empty() { 0 } else { 1 }
    }
}
