use crate::{
    api::{ApiAttributes, AuthMode, GraphqlApi, SchemaAsset},
    binding::ResolverBinding,
    error::StackError,
    names,
};

pub const OUTPUT_GRAPHQL_ID: &str = "GraphQLID";
pub const OUTPUT_GRAPHQL_API_URL: &str = "GraphQLAPIURL";
pub const OUTPUT_GRAPHQL_REALTIME_URL: &str = "GraphQLRealTimeURL";
pub const OUTPUT_GRAPHQL_API_KEY: &str = "GraphQLAPIKey";

const STACK_ID: &str = "API";

/// The owning deployment context. Every scoped name derives from it, and
/// it is passed explicitly to whoever needs one; there is no ambient
/// global scope.
#[derive(Debug, Clone)]
pub struct App {
    name: String,
    stage: String,
    region: String,
}

impl App {
    pub fn new(
        name: impl Into<String>,
        stage: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        App {
            name: name.into(),
            stage: stage.into(),
            region: region.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Scoped logical name: `{stage}-{name}-{id}`.
    pub fn logical_prefixed_name(&self, id: &str) -> String {
        format!("{}-{}-{}", self.stage, self.name, id)
    }
}

/// Everything the assembler needs to declare the API stack.
#[derive(Debug)]
pub struct StackDefinition {
    pub schema: SchemaAsset,
    pub auth: AuthMode,
    pub bindings: Vec<ResolverBinding>,
}

/// A published stack output. An absent value is a valid state, not an
/// error: some auth modes issue no access key.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StackOutput {
    pub name: String,
    pub value: Option<String>,
}

/// A fully wired stack, ready to serialize into a deployment plan.
#[derive(Debug)]
pub struct AssembledStack {
    name: String,
    api: GraphqlApi,
    outputs: Vec<StackOutput>,
}

impl AssembledStack {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api(&self) -> &GraphqlApi {
        &self.api
    }

    pub fn outputs(&self) -> &[StackOutput] {
        &self.outputs
    }
}

/// Assembles the API stack: declares the API, attaches every binding in
/// declaration order, then derives the four outputs from the final
/// handle. Outputs come last; the access key's presence depends on the
/// API's final declared configuration.
pub fn assemble(app: &App, definition: StackDefinition) -> Result<AssembledStack, StackError> {
    let StackDefinition {
        schema,
        auth,
        bindings,
    } = definition;

    let display_name = app.logical_prefixed_name(GraphqlApi::LOGICAL_ID);
    let mut api = GraphqlApi::create(app, display_name, schema, auth);

    for binding in bindings {
        tracing::debug!(
            "attaching resolver {}.{}",
            binding.operation(),
            binding.field()
        );
        binding.attach(&mut api)?;
    }

    let outputs = stack_outputs(api.attributes());

    tracing::info!(
        "assembled {} with {} resolver(s) over {} data source(s)",
        api.name(),
        api.resolvers().len(),
        api.data_sources().len()
    );

    Ok(AssembledStack {
        name: app.logical_prefixed_name(STACK_ID),
        api,
        outputs,
    })
}

/// The four published outputs, derived from the API's final attributes.
fn stack_outputs(attributes: &ApiAttributes) -> Vec<StackOutput> {
    vec![
        StackOutput {
            name: OUTPUT_GRAPHQL_ID.to_owned(),
            value: Some(attributes.api_id.clone()),
        },
        StackOutput {
            name: OUTPUT_GRAPHQL_API_URL.to_owned(),
            value: Some(attributes.graphql_url.clone()),
        },
        StackOutput {
            name: OUTPUT_GRAPHQL_REALTIME_URL.to_owned(),
            value: Some(names::realtime_url(&attributes.graphql_url)),
        },
        StackOutput {
            name: OUTPUT_GRAPHQL_API_KEY.to_owned(),
            value: attributes.api_key.clone(),
        },
    ]
}
