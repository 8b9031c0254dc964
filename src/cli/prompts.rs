//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Select};

use crate::pipeline::Method;

/// Prompt the user to pick an analysis method
pub fn select_method() -> Result<Method> {
    let items: Vec<String> = Method::ALL
        .iter()
        .map(|m| format!("{:<13} {}", m.name(), m.describe()))
        .collect();

    let selection = Select::new()
        .with_prompt("Select analysis method")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Method::ALL[selection])
}

/// Prompt user to confirm overwriting an existing file
pub fn confirm_overwrite(path: &std::path::Path) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", path.display()))
        .default(true)
        .interact()?;
    Ok(confirmed)
}
