use slotmap::new_key_type;

use crate::domain::topology::operation::OperationKey;

new_key_type! {
    pub struct LinkKey;
}

/// A resolved edge: the output of `producer` feeds the input of `consumer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Key to Topology.operations, which is the sender.
    pub producer: OperationKey,

    /// Key to Topology.operations, which is the receiver.
    pub consumer: OperationKey,

    /// Output message name of the producer.
    pub message_name: String,
}
