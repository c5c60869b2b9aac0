use serde::{Deserialize, Serialize};

/// Root of a pipeline blueprint document.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BlueprintDto {
    pub name: Option<String>,
    pub pipeline_id: Option<String>,
    pub version: Option<String>,

    pub nodes: Vec<BlueprintNodeDto>,
}

/// A logical node of the pipeline, identified by the container it runs in.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BlueprintNodeDto {
    pub container_name: String,

    pub node_type: Option<String>,
    pub image: Option<String>,

    /// Location of the schema file describing this node's messages.
    pub proto_uri: Option<String>,

    pub operation_signature_list: Vec<OperationSignatureEntryDto>,
}

/// One declared operation together with the operations its output feeds.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OperationSignatureEntryDto {
    pub operation_signature: OperationSignatureDto,
    pub connected_to: Vec<ConnectionDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OperationSignatureDto {
    pub operation_name: String,
    pub input_message_name: String,
    pub input_message_stream: bool,
    pub output_message_name: String,
    pub output_message_stream: bool,
}

/// Address of the operation receiving a connection.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConnectionDto {
    pub container_name: String,
    pub operation_signature: ConnectionTargetDto,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConnectionTargetDto {
    pub operation_name: String,
}
