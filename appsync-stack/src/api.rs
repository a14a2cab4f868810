use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::{
    binding::{FunctionRef, MappingTemplate, OperationType},
    error::StackError,
    names,
    stack::App,
};

/// How clients authenticate against the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// The deployment engine issues an access key for the API.
    #[default]
    ApiKey,
    /// Requests are signed with platform credentials; no key is issued.
    Iam,
}

/// Resolver logging verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldLogLevel {
    None,
    Error,
    All,
}

/// Logging configuration for the API.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    pub field_log_level: FieldLogLevel,
    pub exclude_verbose_content: bool,
}

/// Opaque reference to a pre-compiled schema document on disk.
///
/// The document's validity is the deployment engine's concern; this side
/// only records the location and later stages the file next to the plan.
#[derive(Debug, Clone)]
pub struct SchemaAsset {
    path: PathBuf,
}

impl SchemaAsset {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        SchemaAsset { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Deploy-time attributes of the provisioned API.
///
/// The engine has not run at assembly time, so values are placeholder
/// expressions in `${Logical.Attribute}` form that the engine resolves on
/// deploy. The region is substituted up front, which keeps the primary
/// URL in its final endpoint shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAttributes {
    pub api_id: String,
    pub graphql_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ApiAttributes {
    fn synthesize(logical_id: &str, region: &str, auth: AuthMode) -> Self {
        let api_id = format!("${{{logical_id}.ApiId}}");
        let graphql_url = format!("https://{api_id}.appsync-api.{region}.amazonaws.com/graphql");
        let api_key = match auth {
            AuthMode::ApiKey => Some(format!("${{{logical_id}.ApiKey}}")),
            AuthMode::Iam => None,
        };

        ApiAttributes {
            api_id,
            graphql_url,
            api_key,
        }
    }
}

/// What a data source delegates to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type")]
pub enum DataSourceTarget {
    /// Invokes a compute function.
    #[serde(rename = "AWS_LAMBDA")]
    Lambda { function: String },
    /// No backend; the mapping templates alone produce the result.
    #[serde(rename = "NONE")]
    None,
}

/// A named execution target resolvers are wired to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DataSource {
    pub name: String,
    #[serde(flatten)]
    pub target: DataSourceTarget,
}

/// The attachment of one operation field to a data source, with optional
/// request/response mapping templates.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolver {
    pub type_name: OperationType,
    pub field_name: String,
    pub data_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_mapping_template: Option<MappingTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mapping_template: Option<MappingTemplate>,
}

/// Handle to the declared GraphQL API.
///
/// Bindings attach through it; the assembler owns it exclusively for the
/// duration of the pass. It accumulates the child declarations and keeps
/// the function-name to data-source map that makes wrapper reuse explicit
/// instead of leaning on the engine's by-name idempotence.
#[derive(Debug)]
pub struct GraphqlApi {
    name: String,
    schema: SchemaAsset,
    log_config: LogConfig,
    xray_enabled: bool,
    auth: AuthMode,
    attributes: ApiAttributes,
    data_sources: IndexMap<String, DataSource>,
    resolvers: Vec<Resolver>,
    functions: IndexMap<String, FunctionRef>,
    // function name -> data-source name, so each function is wrapped once
    function_data_sources: IndexMap<String, String>,
}

impl GraphqlApi {
    pub const LOGICAL_ID: &'static str = "GraphQLAPI";

    /// Declares the API under its scoped display name, with the fixed
    /// observability policy: X-Ray tracing on, every field logged at full
    /// verbosity. A single declarative call; anything wrong with the
    /// schema document surfaces from the deployment engine, not here.
    pub fn create(app: &App, display_name: String, schema: SchemaAsset, auth: AuthMode) -> Self {
        GraphqlApi {
            attributes: ApiAttributes::synthesize(Self::LOGICAL_ID, app.region(), auth),
            name: display_name,
            schema,
            log_config: LogConfig {
                field_log_level: FieldLogLevel::All,
                exclude_verbose_content: false,
            },
            xray_enabled: true,
            auth,
            data_sources: IndexMap::new(),
            resolvers: Vec::new(),
            functions: IndexMap::new(),
            function_data_sources: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &SchemaAsset {
        &self.schema
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    pub fn xray_enabled(&self) -> bool {
        self.xray_enabled
    }

    pub fn auth(&self) -> AuthMode {
        self.auth
    }

    pub fn attributes(&self) -> &ApiAttributes {
        &self.attributes
    }

    pub fn data_sources(&self) -> impl ExactSizeIterator<Item = &DataSource> + '_ {
        self.data_sources.values()
    }

    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    pub fn functions(&self) -> impl ExactSizeIterator<Item = &FunctionRef> + '_ {
        self.functions.values()
    }

    /// Wraps the function in a lambda data source named after the field,
    /// reusing the existing wrapper if this function already has one.
    /// Returns the data-source name the resolver should target.
    pub(crate) fn add_lambda_data_source(
        &mut self,
        field_name: &str,
        function: FunctionRef,
    ) -> Result<String, StackError> {
        if let Some(existing) = self.function_data_sources.get(&function.name) {
            return Ok(existing.clone());
        }

        let name = names::data_source_name(field_name);
        self.insert_data_source(DataSource {
            name: name.clone(),
            target: DataSourceTarget::Lambda {
                function: function.name.clone(),
            },
        })?;
        self.function_data_sources
            .insert(function.name.clone(), name.clone());
        self.functions.entry(function.name.clone()).or_insert(function);

        Ok(name)
    }

    /// Declares a no-backend data source named after the field.
    pub(crate) fn add_none_data_source(&mut self, field_name: &str) -> Result<String, StackError> {
        let name = names::data_source_name(field_name);
        self.insert_data_source(DataSource {
            name: name.clone(),
            target: DataSourceTarget::None,
        })?;

        Ok(name)
    }

    fn insert_data_source(&mut self, data_source: DataSource) -> Result<(), StackError> {
        match self.data_sources.get(&data_source.name) {
            Some(existing) if existing.target == data_source.target => Ok(()),
            Some(_) => Err(StackError::DataSourceConflict(data_source.name)),
            None => {
                self.data_sources
                    .insert(data_source.name.clone(), data_source);
                Ok(())
            }
        }
    }

    /// Rejects a second binding for an already-bound operation field. The
    /// check spans every attached binding, whichever strategy it used.
    pub(crate) fn ensure_unbound(
        &self,
        operation: OperationType,
        field: &str,
    ) -> Result<(), StackError> {
        let bound = self
            .resolvers
            .iter()
            .any(|existing| existing.type_name == operation && existing.field_name == field);
        if bound {
            return Err(StackError::DuplicateResolver {
                operation,
                field: field.to_owned(),
            });
        }

        Ok(())
    }

    /// Records the resolver for an operation field.
    pub(crate) fn create_resolver(&mut self, resolver: Resolver) -> Result<(), StackError> {
        self.ensure_unbound(resolver.type_name, &resolver.field_name)?;
        self.resolvers.push(resolver);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ResolverBinding;

    fn test_api(auth: AuthMode) -> GraphqlApi {
        let app = App::new("notes", "dev", "us-east-1");
        let display_name = app.logical_prefixed_name(GraphqlApi::LOGICAL_ID);
        GraphqlApi::create(&app, display_name, SchemaAsset::from_path("schema.gql"), auth)
    }

    #[test]
    fn duplicate_operation_field_is_rejected() {
        let mut api = test_api(AuthMode::ApiKey);

        ResolverBinding::function(
            OperationType::Query,
            "Hello",
            FunctionRef::new("HelloLambda"),
        )
        .attach(&mut api)
        .unwrap();

        let err = ResolverBinding::template(
            OperationType::Query,
            "Hello",
            MappingTemplate::from_string("{}"),
            MappingTemplate::from_string("{}"),
        )
        .attach(&mut api)
        .unwrap_err();

        assert!(matches!(err, StackError::DuplicateResolver { .. }));
        insta::assert_snapshot!(
            err.to_string(),
            @"a resolver for Query.Hello is declared more than once"
        );
    }

    #[test]
    fn same_field_on_both_operations_is_fine() {
        let mut api = test_api(AuthMode::ApiKey);

        ResolverBinding::function(
            OperationType::Query,
            "notes",
            FunctionRef::new("NotesLambda"),
        )
        .attach(&mut api)
        .unwrap();
        ResolverBinding::function(
            OperationType::Mutation,
            "notes",
            FunctionRef::new("NotesLambda"),
        )
        .attach(&mut api)
        .unwrap();

        assert_eq!(api.resolvers().len(), 2);
    }

    #[test]
    fn one_function_gets_one_data_source() {
        let mut api = test_api(AuthMode::ApiKey);

        for field in ["hello", "goodbye", "shout"] {
            ResolverBinding::function(
                OperationType::Query,
                field,
                FunctionRef::new("HelloLambda"),
            )
            .attach(&mut api)
            .unwrap();
        }

        assert_eq!(api.data_sources().len(), 1);
        assert_eq!(api.resolvers().len(), 3);
        // Every resolver targets the wrapper named after the first field.
        for resolver in api.resolvers() {
            assert_eq!(resolver.data_source, "HelloDataSource");
        }
    }

    #[test]
    fn colliding_data_source_names_are_rejected() {
        let mut api = test_api(AuthMode::ApiKey);

        ResolverBinding::function(
            OperationType::Query,
            "hello",
            FunctionRef::new("HelloLambda"),
        )
        .attach(&mut api)
        .unwrap();

        // A different function whose first field derives the same name.
        let err = ResolverBinding::function(
            OperationType::Mutation,
            "hello",
            FunctionRef::new("OtherLambda"),
        )
        .attach(&mut api)
        .unwrap_err();

        assert!(matches!(err, StackError::DataSourceConflict(name) if name == "HelloDataSource"));
    }

    #[test]
    fn empty_field_names_are_rejected() {
        let mut api = test_api(AuthMode::ApiKey);

        let err = ResolverBinding::function(OperationType::Query, "", FunctionRef::new("Fn"))
            .attach(&mut api)
            .unwrap_err();

        assert!(matches!(err, StackError::EmptyFieldName));
    }

    #[test]
    fn iam_auth_issues_no_key() {
        let api = test_api(AuthMode::Iam);
        assert_eq!(api.attributes().api_key, None);
    }

    #[test]
    fn attributes_keep_the_endpoint_shape() {
        let api = test_api(AuthMode::ApiKey);

        assert_eq!(api.attributes().api_id, "${GraphQLAPI.ApiId}");
        assert_eq!(
            api.attributes().graphql_url,
            "https://${GraphQLAPI.ApiId}.appsync-api.us-east-1.amazonaws.com/graphql"
        );
        assert_eq!(
            api.attributes().api_key.as_deref(),
            Some("${GraphQLAPI.ApiKey}")
        );
    }
}
