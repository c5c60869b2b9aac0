/// Message name reserved for operations that take no input.
pub const EMPTY_MESSAGE_NAME: &str = "Empty";

/// Data shape flowing into or out of an operation. The name is resolved
/// against the schema files by the code generator, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    pub name: String,
    pub stream: bool,
}

impl Message {
    pub fn new(name: impl Into<String>, stream: bool) -> Self {
        Message { name: name.into(), stream }
    }

    pub fn is_empty(&self) -> bool {
        self.name == EMPTY_MESSAGE_NAME
    }
}
