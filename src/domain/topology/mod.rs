pub mod extractor;
pub mod link;
pub mod message;
pub mod node;
pub mod operation;
pub mod resolver;
pub mod topology;

#[cfg(test)]
pub(crate) mod test_support;
