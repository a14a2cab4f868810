use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    api::{ApiAttributes, AuthMode, DataSource, GraphqlApi, LogConfig, Resolver},
    binding::FunctionRef,
    error::StackError,
    stack::{AssembledStack, StackOutput},
};

const ASSET_DIR: &str = "assets";
const PLAN_FILE: &str = "plan.json";

/// The API declaration as the deployment engine receives it.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlan {
    pub logical_id: String,
    pub name: String,
    /// Location of the staged schema document, relative to the plan file.
    pub schema: String,
    pub authorization: AuthMode,
    pub log_config: LogConfig,
    pub xray_enabled: bool,
    pub attributes: ApiAttributes,
}

/// The full declaration set handed to the deployment engine: the API,
/// the functions it references, the wiring, and the published outputs.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackPlan {
    pub stack: String,
    pub api: ApiPlan,
    pub functions: Vec<FunctionRef>,
    pub data_sources: Vec<DataSource>,
    pub resolvers: Vec<Resolver>,
    pub outputs: Vec<StackOutput>,
}

impl StackPlan {
    /// Lays the assembled declarations out in engine order. The caller
    /// names the schema location the plan should reference; `write_plan`
    /// picks the staged one.
    pub fn from_stack(stack: &AssembledStack, staged_schema: impl Into<String>) -> Self {
        let api = stack.api();

        StackPlan {
            stack: stack.name().to_owned(),
            api: ApiPlan {
                logical_id: GraphqlApi::LOGICAL_ID.to_owned(),
                name: api.name().to_owned(),
                schema: staged_schema.into(),
                authorization: api.auth(),
                log_config: api.log_config().clone(),
                xray_enabled: api.xray_enabled(),
                attributes: api.attributes().clone(),
            },
            functions: api.functions().cloned().collect(),
            data_sources: api.data_sources().cloned().collect(),
            resolvers: api.resolvers().to_vec(),
            outputs: stack.outputs().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, StackError> {
        serde_json::to_string_pretty(self).map_err(StackError::SerializePlan)
    }
}

/// Stages the schema document under `out_dir/assets/` and writes
/// `plan.json` next to it. Returns the plan's path.
///
/// A missing or unreadable schema surfaces here, at the packaging step,
/// not during assembly.
pub fn write_plan(stack: &AssembledStack, out_dir: &Path) -> Result<PathBuf, StackError> {
    let asset_dir = out_dir.join(ASSET_DIR);
    fs::create_dir_all(&asset_dir).map_err(|source| StackError::WritePlan {
        path: asset_dir.clone(),
        source,
    })?;

    let schema_source = stack.api().schema().path();
    let schema_file = schema_source
        .file_name()
        .unwrap_or_else(|| OsStr::new("schema.gql"));
    fs::copy(schema_source, asset_dir.join(schema_file)).map_err(|source| {
        StackError::SchemaAsset {
            path: schema_source.to_owned(),
            source,
        }
    })?;

    let plan = StackPlan::from_stack(
        stack,
        format!("{ASSET_DIR}/{}", schema_file.to_string_lossy()),
    );
    let plan_path = out_dir.join(PLAN_FILE);
    fs::write(&plan_path, plan.to_json()?).map_err(|source| StackError::WritePlan {
        path: plan_path.clone(),
        source,
    })?;

    Ok(plan_path)
}
