//! DTO builders shared by the topology unit tests.

use crate::api::blueprint_dto::{
    BlueprintDto, BlueprintNodeDto, ConnectionDto, ConnectionTargetDto, OperationSignatureDto, OperationSignatureEntryDto,
};
use crate::api::dockerinfo_dto::{DockerInfoDto, DockerInfoEntryDto};

/// A non-streaming operation signature without connections.
pub fn signature(operation: &str, input: &str, output: &str) -> OperationSignatureEntryDto {
    OperationSignatureEntryDto {
        operation_signature: OperationSignatureDto {
            operation_name: operation.to_string(),
            input_message_name: input.to_string(),
            input_message_stream: false,
            output_message_name: output.to_string(),
            output_message_stream: false,
        },
        connected_to: vec![],
    }
}

/// Adds a `connected_to` entry pointing at `container.operation`.
pub fn connect(mut entry: OperationSignatureEntryDto, container: &str, operation: &str) -> OperationSignatureEntryDto {
    entry.connected_to.push(ConnectionDto {
        container_name: container.to_string(),
        operation_signature: ConnectionTargetDto { operation_name: operation.to_string() },
    });
    entry
}

pub fn node(container: &str, signatures: Vec<OperationSignatureEntryDto>) -> BlueprintNodeDto {
    BlueprintNodeDto {
        container_name: container.to_string(),
        node_type: None,
        image: None,
        proto_uri: None,
        operation_signature_list: signatures,
    }
}

pub fn blueprint(nodes: Vec<BlueprintNodeDto>) -> BlueprintDto {
    BlueprintDto { name: Some("test-pipeline".to_string()), pipeline_id: None, version: None, nodes }
}

/// One dockerinfo entry per container, on consecutive ports of 10.0.0.x.
pub fn dockerinfo(containers: &[&str]) -> DockerInfoDto {
    DockerInfoDto {
        docker_info_list: containers
            .iter()
            .enumerate()
            .map(|(i, name)| DockerInfoEntryDto {
                container_name: name.to_string(),
                ip_address: format!("10.0.0.{}", i + 1),
                port: 9000 + i as u16,
            })
            .collect(),
    }
}
