use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use appsync_stack::{
    App, AuthMode, FunctionRef, MappingTemplate, OperationType, ResolverBinding, SchemaAsset,
    StackDefinition,
};

use crate::errors::CliError;

/// Contents of the stack configuration file.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StackConfig {
    /// The owning application context
    pub(crate) app: AppConfig,
    /// The API declaration
    pub(crate) api: ApiConfig,
    /// Compute functions referenced by resolvers, keyed by name
    #[serde(default)]
    pub(crate) functions: BTreeMap<String, FunctionConfig>,
    /// The declared operation set
    #[serde(default)]
    pub(crate) resolvers: Vec<ResolverConfig>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AppConfig {
    pub(crate) name: String,
    pub(crate) stage: String,
    pub(crate) region: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ApiConfig {
    /// Path of the pre-compiled schema document, relative to this file
    pub(crate) schema: PathBuf,
    /// How clients authenticate
    #[serde(default)]
    pub(crate) authorization: AuthMode,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FunctionConfig {
    /// Build entry point handed to the external build step
    pub(crate) entry: Option<String>,
}

/// One resolver declaration. Exactly one strategy applies: a `function`
/// reference, or a request/response template pair.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ResolverConfig {
    pub(crate) operation: OperationType,
    pub(crate) field: String,
    pub(crate) function: Option<String>,
    pub(crate) request_template: Option<String>,
    pub(crate) response_template: Option<String>,
}

impl StackConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| CliError::ParseConfig {
            path: path.to_owned(),
            source,
        })
    }

    pub(crate) fn app(&self) -> App {
        App::new(
            self.app.name.as_str(),
            self.app.stage.as_str(),
            self.app.region.as_str(),
        )
    }

    /// Builds the stack definition, resolving schema and function
    /// references against `base_dir` and the `[functions]` table.
    pub(crate) fn definition(&self, base_dir: &Path) -> Result<StackDefinition, CliError> {
        let mut bindings = Vec::with_capacity(self.resolvers.len());
        for resolver in &self.resolvers {
            bindings.push(self.binding(resolver)?);
        }

        Ok(StackDefinition {
            schema: SchemaAsset::from_path(base_dir.join(&self.api.schema)),
            auth: self.api.authorization,
            bindings,
        })
    }

    fn binding(&self, resolver: &ResolverConfig) -> Result<ResolverBinding, CliError> {
        match (
            &resolver.function,
            &resolver.request_template,
            &resolver.response_template,
        ) {
            (Some(function), None, None) => {
                let config =
                    self.functions
                        .get(function)
                        .ok_or_else(|| CliError::UnknownFunction {
                            field: resolver.field.clone(),
                            function: function.clone(),
                        })?;
                let function = match &config.entry {
                    Some(entry) => FunctionRef::with_entry(function.as_str(), entry.as_str()),
                    None => FunctionRef::new(function.as_str()),
                };

                Ok(ResolverBinding::function(
                    resolver.operation,
                    resolver.field.as_str(),
                    function,
                ))
            }
            (None, Some(request), Some(response)) => Ok(ResolverBinding::template(
                resolver.operation,
                resolver.field.as_str(),
                MappingTemplate::from_string(request.as_str()),
                MappingTemplate::from_string(response.as_str()),
            )),
            _ => Err(CliError::InvalidResolverStrategy(resolver.field.clone())),
        }
    }
}
