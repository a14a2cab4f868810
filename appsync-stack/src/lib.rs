//! Declarative wiring for an AppSync-style managed GraphQL API.
//!
//! The crate turns a set of resolver declarations into a deployment plan:
//! the API resource itself, one data source per execution target, one
//! resolver per bound operation field, and the connection outputs
//! (identifier, endpoint URLs, access key) a deployment engine publishes
//! once the stack is live.
//!
//! Assembly is a one-shot, strictly linear pass. Nothing talks to the
//! cloud from here; the [`StackPlan`] is the contract handed to the
//! external deployment engine.

#![forbid(unsafe_code)]
#![cfg_attr(test, allow(unused_crate_dependencies))]

mod api;
mod binding;
mod error;
pub mod names;
mod plan;
mod stack;

pub use api::{
    ApiAttributes, AuthMode, DataSource, DataSourceTarget, FieldLogLevel, GraphqlApi, LogConfig,
    Resolver, SchemaAsset,
};
pub use binding::{FunctionRef, MappingTemplate, OperationType, ResolverBinding};
pub use error::StackError;
pub use plan::{write_plan, ApiPlan, StackPlan};
pub use stack::{
    assemble, App, AssembledStack, StackDefinition, StackOutput, OUTPUT_GRAPHQL_API_KEY,
    OUTPUT_GRAPHQL_API_URL, OUTPUT_GRAPHQL_ID, OUTPUT_GRAPHQL_REALTIME_URL,
};
