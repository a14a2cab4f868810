use std::{io, path::PathBuf};

use thiserror::Error;

use crate::binding::OperationType;

/// Assembly errors. Every variant is fatal to the whole pass: nothing is
/// retried and no partially wired stack survives.
#[derive(Debug, Error)]
pub enum StackError {
    /// returned when two bindings declare the same operation field
    #[error("a resolver for {operation}.{field} is declared more than once")]
    DuplicateResolver {
        operation: OperationType,
        field: String,
    },

    /// returned when a binding declares an empty field name
    #[error("resolver field names cannot be empty")]
    EmptyFieldName,

    /// returned when a data-source name is reused for a different target
    #[error("a data source named {0} already exists with a different target")]
    DataSourceConflict(String),

    /// returned if the schema document cannot be staged next to the plan
    #[error("could not stage the schema document at {path}\ncaused by: {source}")]
    SchemaAsset { path: PathBuf, source: io::Error },

    /// returned if the deployment plan cannot be serialized
    #[error("could not serialize the deployment plan\ncaused by: {0}")]
    SerializePlan(serde_json::Error),

    /// returned if the deployment plan cannot be written
    #[error("could not write the deployment plan to {path}\ncaused by: {source}")]
    WritePlan { path: PathBuf, source: io::Error },
}
