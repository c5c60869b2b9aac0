use thiserror::Error;

use crate::domain::topology::resolver::ConflictingConnection;
use crate::domain::utils::id::{ContainerName, OperationName};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse pipeline JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write link table: {0}")]
    CsvError(#[from] csv::Error),

    #[error(
        "dockerinfo contains duplicate container name '{container_name}' (entries {first_index} and {duplicate_index})"
    )]
    DuplicateIdentityError { container_name: ContainerName, first_index: usize, duplicate_index: usize },

    #[error("container '{container_name}' referenced by {referenced_by} is not present in dockerinfo")]
    MissingDeploymentError { container_name: ContainerName, referenced_by: String },

    #[error("container '{container_name}' declares operation '{operation}' more than once")]
    DuplicateOperationError { container_name: ContainerName, operation: OperationName },

    #[error(
        "encountered {observed} incoming links for operation '{container_name}.{operation}' with input type '{input_message}' (expected {expected}): [{}]",
        render_conflicts(.conflicting)
    )]
    LinkCardinalityError {
        container_name: ContainerName,
        operation: OperationName,
        input_message: String,
        observed: usize,
        expected: usize,
        conflicting: Vec<ConflictingConnection>,
    },
}

fn render_conflicts(conflicting: &[ConflictingConnection]) -> String {
    conflicting.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
