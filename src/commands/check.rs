use anyhow::{Context, Result};
use std::path::Path;
use assert_license::config::load_element_file;
use assert_license::graph::{LocalHost, ProjectGraph};
use assert_license::output::{format_table_output, render_check_json, CheckReport};
use assert_license::{Element, PluginRegistry};
use crate::cli::OutputFormat;

pub fn handle_check(
    project: &Path,
    element: &Path,
    target: &str,
    format: OutputFormat,
    exit_zero: bool,
    quiet: bool,
) -> Result<()> {
    let graph = ProjectGraph::load(project)?;
    let declaration = load_element_file(element)?;

    let mut license_element = PluginRegistry::builtin().license_element(&declaration.kind)?;
    license_element
        .configure(&declaration.config)
        .with_context(|| format!("Failed to configure element: {}", element.display()))?;

    let host = LocalHost::new(&graph, target)?;
    let audit = license_element.audit(&host)?;
    let warnings = host.diagnostics().warnings();

    let output_content = match format {
        OutputFormat::Json => render_check_json(&CheckReport {
            licenses: &audit.licenses,
            violations: audit.violations.as_ref(),
            warnings,
        })?,
        OutputFormat::Table => format_table_output(&audit.licenses, audit.violations.as_ref()),
    };
    if !quiet {
        print!("{}", output_content);
    }

    if let Some(violations) = &audit.violations {
        if !violations.is_clean() {
            eprintln!("License violations found: {} total", violations.total);
            if !exit_zero {
                eprintln!("Exiting with error due to blacklisted licenses");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
