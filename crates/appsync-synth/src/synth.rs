use std::path::Path;

use appsync_stack::{assemble, write_plan};

use crate::{cli_input::Args, config::StackConfig, errors::CliError, report};

pub(crate) fn synth(args: &Args) -> Result<(), CliError> {
    let config = StackConfig::load(&args.config_path)?;
    let base_dir = args.config_path.parent().unwrap_or_else(|| Path::new("."));

    let app = config.app();
    let definition = config.definition(base_dir)?;
    tracing::debug!("declared {} resolver(s)", definition.bindings.len());

    let stack = assemble(&app, definition)?;
    let plan_path = write_plan(&stack, &args.out_dir)?;

    report::synthesized(&stack, &plan_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(dir: &Path) -> Args {
        std::fs::write(
            dir.join("schema.gql"),
            "type Query { Hello: String version: String }",
        )
        .unwrap();
        std::fs::write(
            dir.join("stack.toml"),
            r#"
            [app]
            name = "notes"
            stage = "dev"
            region = "us-east-1"

            [api]
            schema = "schema.gql"

            [functions.HelloLambda]
            entry = "src/hello.ts"

            [[resolvers]]
            operation = "Query"
            field = "Hello"
            function = "HelloLambda"

            [[resolvers]]
            operation = "Query"
            field = "version"
            request_template = "{}"
            response_template = "{}"
            "#,
        )
        .unwrap();

        Args {
            config_path: dir.join("stack.toml"),
            out_dir: dir.join(".build"),
            log_filter: None,
        }
    }

    #[test]
    fn synthesizes_a_plan_from_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = write_project(dir.path());

        synth(&args).unwrap();

        assert!(args.out_dir.join("assets/schema.gql").exists());

        let plan: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(args.out_dir.join("plan.json")).unwrap(),
        )
        .unwrap();

        assert_eq!(plan["stack"], "dev-notes-API");
        assert_eq!(plan["api"]["name"], "dev-notes-GraphQLAPI");
        assert_eq!(plan["resolvers"].as_array().unwrap().len(), 2);
        assert_eq!(plan["outputs"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn duplicate_fields_in_the_config_fail() {
        let dir = tempfile::tempdir().unwrap();
        let args = write_project(dir.path());

        let mut config = std::fs::read_to_string(&args.config_path).unwrap();
        config.push_str(
            r#"
            [[resolvers]]
            operation = "Query"
            field = "version"
            request_template = "{}"
            response_template = "{}"
            "#,
        );
        std::fs::write(&args.config_path, config).unwrap();

        let err = synth(&args).unwrap_err();
        assert!(matches!(err, CliError::Stack(_)));
        // Nothing is written on a failed pass.
        assert!(!args.out_dir.exists());
    }
}
