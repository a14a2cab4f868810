use std::{io, path::PathBuf};

use appsync_stack::StackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// returned if the stack configuration file cannot be read
    #[error("could not read the configuration file at {path}\ncaused by: {source}")]
    ReadConfig { path: PathBuf, source: io::Error },

    /// returned if the stack configuration file cannot be parsed
    #[error("could not parse the configuration file at {path}\ncaused by: {source}")]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// returned when a resolver references a function that is not declared
    #[error("the resolver for {field} references {function}, which is not declared under [functions]")]
    UnknownFunction { field: String, function: String },

    /// returned when a resolver declares neither or both strategies
    #[error(
        "the resolver for {0} must declare either a function or a request/response template pair"
    )]
    InvalidResolverStrategy(String),

    /// wraps an assembly error
    #[error(transparent)]
    Stack(#[from] StackError),
}
