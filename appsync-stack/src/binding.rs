use crate::{
    api::{GraphqlApi, Resolver},
    error::StackError,
};

/// GraphQL root operation a resolver is attached under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display,
)]
pub enum OperationType {
    Query,
    Mutation,
}

/// Reference to an externally built compute function.
///
/// Only the name takes part in wiring: it is the identity under which a
/// function's data source is reused. The entry locator is passed through
/// to the external build step untouched.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FunctionRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

impl FunctionRef {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionRef {
            name: name.into(),
            entry: None,
        }
    }

    pub fn with_entry(name: impl Into<String>, entry: impl Into<String>) -> Self {
        FunctionRef {
            name: name.into(),
            entry: Some(entry.into()),
        }
    }
}

/// An opaque request or response mapping template.
///
/// The template text is threaded through to the deployment engine
/// unmodified; its grammar is the engine's concern.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct MappingTemplate(String);

impl MappingTemplate {
    pub fn from_string(template: impl Into<String>) -> Self {
        MappingTemplate(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One operation field bound to its resolution strategy.
///
/// A binding is constructed, attached to the API handle, and discarded;
/// it is not kept as state after attachment.
#[derive(Debug, Clone)]
pub enum ResolverBinding {
    /// Delegates execution to an external compute function. Arguments and
    /// results pass through without any template transformation.
    Function {
        operation: OperationType,
        field: String,
        function: FunctionRef,
    },
    /// Shapes the request and response with two mapping templates; no
    /// compute is invoked.
    Template {
        operation: OperationType,
        field: String,
        request_template: MappingTemplate,
        response_template: MappingTemplate,
    },
}

impl ResolverBinding {
    pub fn function(
        operation: OperationType,
        field: impl Into<String>,
        function: FunctionRef,
    ) -> Self {
        ResolverBinding::Function {
            operation,
            field: field.into(),
            function,
        }
    }

    pub fn template(
        operation: OperationType,
        field: impl Into<String>,
        request_template: MappingTemplate,
        response_template: MappingTemplate,
    ) -> Self {
        ResolverBinding::Template {
            operation,
            field: field.into(),
            request_template,
            response_template,
        }
    }

    pub fn operation(&self) -> OperationType {
        match self {
            ResolverBinding::Function { operation, .. }
            | ResolverBinding::Template { operation, .. } => *operation,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ResolverBinding::Function { field, .. } | ResolverBinding::Template { field, .. } => {
                field
            }
        }
    }

    /// Declares the data source and resolver for this binding on the API.
    ///
    /// Fails fast on an empty field name, on a second binding for the
    /// same operation field, and on a data-source name that is already
    /// taken by a different target.
    pub fn attach(self, api: &mut GraphqlApi) -> Result<(), StackError> {
        if self.field().is_empty() {
            return Err(StackError::EmptyFieldName);
        }
        // Checked up front so a duplicate field is reported as such, not
        // as a data-source clash with the earlier binding.
        api.ensure_unbound(self.operation(), self.field())?;

        match self {
            ResolverBinding::Function {
                operation,
                field,
                function,
            } => {
                let data_source = api.add_lambda_data_source(&field, function)?;
                api.create_resolver(Resolver {
                    type_name: operation,
                    field_name: field,
                    data_source,
                    request_mapping_template: None,
                    response_mapping_template: None,
                })
            }
            ResolverBinding::Template {
                operation,
                field,
                request_template,
                response_template,
            } => {
                let data_source = api.add_none_data_source(&field)?;
                api.create_resolver(Resolver {
                    type_name: operation,
                    field_name: field,
                    data_source,
                    request_mapping_template: Some(request_template),
                    response_mapping_template: Some(response_template),
                })
            }
        }
    }
}
