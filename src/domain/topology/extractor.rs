use std::collections::HashMap;
use std::collections::hash_map::Entry;

use slotmap::SlotMap;

use crate::api::blueprint_dto::BlueprintDto;
use crate::domain::topology::message::Message;
use crate::domain::topology::node::NodeRegistry;
use crate::domain::topology::operation::{Operation, OperationAddress, OperationKey};
use crate::domain::utils::id::{ContainerName, OperationName};
use crate::error::Error;

/// A declared outgoing connection whose target has not been looked up yet.
///
/// Declarations are not topologically ordered, so the target operation may
/// not exist when its producer is visited. The link resolver joins these
/// against the complete operation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLink {
    /// Key to the operation that declared the connection.
    pub producer: OperationKey,
    pub producer_address: OperationAddress,

    /// Output message name of the producer.
    pub message_name: String,

    pub target: OperationAddress,
}

/// Result of walking the blueprint: the operation arena in declaration order
/// plus every declared connection.
#[derive(Debug, Default)]
pub struct ExtractedOperations {
    pub operations: SlotMap<OperationKey, Operation>,

    /// Keys to `operations` in blueprint declaration order.
    pub order: Vec<OperationKey>,

    pub pending: Vec<PendingLink>,

    /// `(container, operation)` -> key to `operations`, across the whole blueprint.
    pub index: HashMap<OperationAddress, OperationKey>,
}

/// Creates one `Operation` per declared signature and one `PendingLink` per
/// `connected_to` entry.
pub fn extract_operations(blueprint: &BlueprintDto, registry: &NodeRegistry) -> Result<ExtractedOperations, Error> {
    let mut extracted = ExtractedOperations::default();

    for node_dto in &blueprint.nodes {
        let container_name = ContainerName::new(node_dto.container_name.clone());

        for entry in &node_dto.operation_signature_list {
            let sig = &entry.operation_signature;

            let operation = Operation::new(
                container_name.clone(),
                OperationName::new(sig.operation_name.clone()),
                Message::new(sig.input_message_name.clone(), sig.input_message_stream),
                Message::new(sig.output_message_name.clone(), sig.output_message_stream),
            );
            let producer_address = operation.address();

            // A container may be listed in several blueprint entries; names must stay unique across all of them.
            let Entry::Vacant(slot) = extracted.index.entry(producer_address.clone()) else {
                return Err(Error::DuplicateOperationError {
                    container_name: producer_address.container_name,
                    operation: producer_address.operation,
                });
            };
            let key = extracted.operations.insert(operation);
            slot.insert(key);
            extracted.order.push(key);

            for connection in &entry.connected_to {
                let target = OperationAddress::new(
                    connection.container_name.clone(),
                    connection.operation_signature.operation_name.clone(),
                );

                if !registry.contains(&target.container_name) {
                    return Err(Error::MissingDeploymentError {
                        container_name: target.container_name,
                        referenced_by: format!("connection from '{}'", producer_address),
                    });
                }

                extracted.pending.push(PendingLink {
                    producer: key,
                    producer_address: producer_address.clone(),
                    message_name: sig.output_message_name.clone(),
                    target,
                });
            }
        }
    }

    log::debug!(
        "Extracted {} operations and {} declared connections from {} blueprint nodes.",
        extracted.order.len(),
        extracted.pending.len(),
        blueprint.nodes.len()
    );

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::blueprint_dto::OperationSignatureDto;
    use crate::domain::topology::test_support::{blueprint, connect, dockerinfo, node, signature};

    fn build(bp: &BlueprintDto, containers: &[&str]) -> Result<ExtractedOperations, Error> {
        let registry = NodeRegistry::build(&dockerinfo(containers), bp)?;
        extract_operations(bp, &registry)
    }

    #[test]
    fn test_operations_in_declaration_order() {
        let bp = blueprint(vec![
            node("B", vec![signature("Consume", "Data", "Empty"), signature("Report", "Empty", "Stats")]),
            node("A", vec![connect(signature("Produce", "Empty", "Data"), "B", "Consume")]),
        ]);

        let extracted = build(&bp, &["A", "B"]).unwrap();

        let addresses: Vec<String> = extracted.order.iter().map(|k| extracted.operations[*k].address().to_string()).collect();
        assert_eq!(addresses, vec!["B.Consume", "B.Report", "A.Produce"]);

        for key in &extracted.order {
            let op = &extracted.operations[*key];
            assert!(op.incoming.is_empty());
            assert!(op.outgoing.is_empty());
        }
    }

    #[test]
    fn test_messages_carry_stream_flags() {
        let mut entry = signature("Stream", "Frame", "Detection");
        entry.operation_signature = OperationSignatureDto {
            operation_name: "Stream".to_string(),
            input_message_name: "Frame".to_string(),
            input_message_stream: true,
            output_message_name: "Detection".to_string(),
            output_message_stream: false,
        };
        let bp = blueprint(vec![node("A", vec![entry])]);

        let extracted = build(&bp, &["A"]).unwrap();
        let op = &extracted.operations[extracted.order[0]];

        assert_eq!(op.input, Message::new("Frame", true));
        assert_eq!(op.output, Message::new("Detection", false));
        assert_eq!(op.node, ContainerName::new("A"));
    }

    #[test]
    fn test_pending_links_use_producer_output() {
        let produce = connect(connect(signature("Produce", "Empty", "Data"), "B", "Consume"), "C", "Archive");
        let bp = blueprint(vec![
            node("A", vec![produce]),
            node("B", vec![signature("Consume", "Data", "Empty")]),
            node("C", vec![signature("Archive", "Data", "Empty")]),
        ]);

        let extracted = build(&bp, &["A", "B", "C"]).unwrap();

        assert_eq!(extracted.pending.len(), 2);
        let producer = extracted.order[0];
        for pending in &extracted.pending {
            assert_eq!(pending.producer, producer);
            assert_eq!(pending.message_name, "Data");
            assert_eq!(pending.producer_address, OperationAddress::new("A", "Produce"));
        }
        assert_eq!(extracted.pending[0].target, OperationAddress::new("B", "Consume"));
        assert_eq!(extracted.pending[1].target, OperationAddress::new("C", "Archive"));
    }

    #[test]
    fn test_same_operation_name_on_different_nodes() {
        let bp = blueprint(vec![
            node("A", vec![signature("Run", "Empty", "Data")]),
            node("B", vec![signature("Run", "Empty", "Data")]),
        ]);

        let extracted = build(&bp, &["A", "B"]).unwrap();

        assert_eq!(extracted.order.len(), 2);
    }

    #[test]
    fn test_duplicate_operation_on_one_node() {
        let bp = blueprint(vec![node("A", vec![signature("Run", "Empty", "Data"), signature("Run", "Data", "Data")])]);

        match build(&bp, &["A"]) {
            Err(Error::DuplicateOperationError { container_name, operation }) => {
                assert_eq!(container_name.as_str(), "A");
                assert_eq!(operation.as_str(), "Run");
            }
            other => panic!("Expected DuplicateOperationError, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_operation_across_repeated_container() {
        let bp = blueprint(vec![
            node("A", vec![connect(signature("Produce", "Empty", "Data"), "B", "Consume")]),
            node("B", vec![signature("Consume", "Data", "Empty")]),
            node("B", vec![signature("Consume", "Data", "Empty")]),
        ]);

        match build(&bp, &["A", "B"]) {
            Err(Error::DuplicateOperationError { container_name, operation }) => {
                assert_eq!(container_name.as_str(), "B");
                assert_eq!(operation.as_str(), "Consume");
            }
            other => panic!("Expected DuplicateOperationError, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_container_with_distinct_operations() {
        let bp = blueprint(vec![
            node("B", vec![signature("Consume", "Data", "Empty")]),
            node("A", vec![connect(signature("Produce", "Empty", "Data"), "B", "Consume")]),
            node("B", vec![signature("Report", "Empty", "Stats")]),
        ]);

        let extracted = build(&bp, &["A", "B"]).unwrap();

        assert_eq!(extracted.order.len(), 3);
        assert_eq!(extracted.index.len(), 3);
        let report = extracted.index[&OperationAddress::new("B", "Report")];
        assert_eq!(extracted.operations[report].name.as_str(), "Report");
    }

    #[test]
    fn test_connection_to_undeployed_container() {
        let bp = blueprint(vec![node("A", vec![connect(signature("Produce", "Empty", "Data"), "Z", "Consume")])]);

        match build(&bp, &["A"]) {
            Err(Error::MissingDeploymentError { container_name, referenced_by }) => {
                assert_eq!(container_name.as_str(), "Z");
                assert!(referenced_by.contains("A.Produce"), "got '{}'", referenced_by);
            }
            other => panic!("Expected MissingDeploymentError, got {:?}", other),
        }
    }
}
