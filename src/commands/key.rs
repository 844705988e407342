use anyhow::{Context, Result};
use std::path::Path;
use assert_license::config::load_element_file;
use assert_license::PluginRegistry;

pub fn handle_key(element: &Path) -> Result<()> {
    let declaration = load_element_file(element)?;

    let mut plugin = PluginRegistry::builtin().create(&declaration.kind)?;
    plugin
        .configure(&declaration.config)
        .with_context(|| format!("Failed to configure element: {}", element.display()))?;

    println!("{}", serde_json::to_string_pretty(&plugin.unique_key()?)?);
    Ok(())
}
