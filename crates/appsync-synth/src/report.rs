use std::path::Path;

use appsync_stack::AssembledStack;

use crate::errors::CliError;

pub(crate) fn synthesized(stack: &AssembledStack, plan_path: &Path) {
    println!("Stack {} synthesized to {}", stack.name(), plan_path.display());
    println!();
    println!("Outputs:");
    for output in stack.outputs() {
        match &output.value {
            Some(value) => println!("  {}: {value}", output.name),
            None => println!("  {}: <not issued>", output.name),
        }
    }
}

pub(crate) fn error(error: &CliError) {
    eprintln!("Error: {error}");
}
