use serde::{Deserialize, Serialize};

/// Serialized form of a resolved topology, consumed by the execution runtime
/// and the code generators. Operations and links refer to each other by
/// their position in `operations` and `links`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TopologyDto {
    pub pipeline: Option<String>,
    pub nodes: Vec<NodeDto>,
    pub operations: Vec<OperationDto>,
    pub links: Vec<LinkDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeDto {
    pub container_name: String,
    pub host: String,
    pub port: u16,
    pub proto_uri: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageDto {
    pub name: String,
    pub stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OperationDto {
    pub container_name: String,
    pub operation_name: String,
    pub input: MessageDto,
    pub output: MessageDto,

    /// Indices into `TopologyDto::links`
    pub incoming: Vec<usize>,
    pub outgoing: Vec<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LinkDto {
    /// Index into `TopologyDto::operations` of the operation producing the message.
    pub producer: usize,
    /// Index into `TopologyDto::operations` of the operation consuming the message.
    pub consumer: usize,
    pub message_name: String,
}
