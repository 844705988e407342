use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use assert_license::config::load_element_file;
use assert_license::graph::{LocalHost, ProjectGraph};
use assert_license::sandbox::DirectorySandbox;
use assert_license::PluginRegistry;

pub fn handle_assemble(
    project: &Path,
    element: &Path,
    target: &str,
    output: &Path,
    quiet: bool,
) -> Result<()> {
    let graph = ProjectGraph::load(project)?;
    let declaration = load_element_file(element)?;

    let registry = PluginRegistry::builtin();
    let mut plugin = registry.create(&declaration.kind)?;

    plugin
        .configure(&declaration.config)
        .with_context(|| format!("Failed to configure element: {}", element.display()))?;
    plugin.preflight()?;

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    let sandbox = DirectorySandbox::new(output);
    plugin.configure_sandbox(&sandbox)?;
    plugin.stage(&sandbox)?;

    let host = LocalHost::new(&graph, target)?;
    let root = plugin.assemble(&host, &sandbox).with_context(|| {
        format!(
            "Failed to assemble element '{}' ({} warnings)",
            target,
            host.diagnostics().warnings().len()
        )
    })?;

    let warnings = host.diagnostics().warnings();
    info!(element = target, root = %root, warnings = warnings.len(), "element assembled");
    if !quiet {
        println!("✅ Assembled '{}' into {}", target, output.display());
        for warning in &warnings {
            println!("⚠️  {}", warning.detail);
        }
    }

    Ok(())
}
