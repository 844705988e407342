use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::info;

use serde::Serialize;

use crate::diagnostics::Warning;
use crate::error::ElementError;
use crate::license::LicenseMap;
use crate::policy::ViolationSummary;

/// Everything `check` knows about one audit, as printed with `--format json`.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub licenses: &'a LicenseMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<&'a ViolationSummary>,
    pub warnings: Vec<Warning>,
}

/// Render the license map as pretty JSON with a trailing newline.
pub fn render_json(licenses: &LicenseMap) -> Result<String, ElementError> {
    let mut content = serde_json::to_string_pretty(licenses)?;
    content.push('\n');
    Ok(content)
}

/// Render a check report as pretty JSON with a trailing newline.
pub fn render_check_json(report: &CheckReport<'_>) -> Result<String, ElementError> {
    let mut content = serde_json::to_string_pretty(report)?;
    content.push('\n');
    Ok(content)
}

/// Reject artifact paths that could leave the sandbox root.
pub fn validate_artifact_path(path: &str) -> Result<(), ElementError> {
    if Path::new(path).components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ElementError::InvalidMember {
            key: "path".to_string(),
            reason: format!("must not contain '..' components, found '{}'", path),
        });
    }
    Ok(())
}

/// Resolve `path` below `root`. Absolute paths are taken relative to `root`.
pub fn artifact_path(root: &Path, path: &str) -> Result<PathBuf, ElementError> {
    validate_artifact_path(path)?;

    let relative: PathBuf = Path::new(path)
        .components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .collect();
    Ok(root.join(relative))
}

/// Write the license report below the sandbox root and return its location.
pub fn write_report(root: &Path, path: &str, licenses: &LicenseMap) -> Result<PathBuf, ElementError> {
    let content = render_json(licenses)?;
    let target = artifact_path(root, path)?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| ElementError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target, content).map_err(|source| ElementError::Io {
        path: target.clone(),
        source,
    })?;

    info!(path = %target.display(), dependencies = licenses.len(), "wrote license report");
    Ok(target)
}

pub fn format_table_output(licenses: &LicenseMap, violations: Option<&ViolationSummary>) -> String {
    let mut output = String::new();

    let flagged = violations.map(|v| v.total).unwrap_or(0);
    output.push_str(&format!("📦 License Summary ({} dependencies)\n", licenses.len()));
    output.push_str(&format!("🚫 {} blacklist violations\n\n", flagged));

    if licenses.is_empty() {
        output.push_str("No dependencies found.\n");
        return output;
    }

    output.push_str("┌──────────────────────┬──────────────────────────────┬────────┐\n");
    output.push_str("│ Dependency           │ License                      │ Status │\n");
    output.push_str("├──────────────────────┼──────────────────────────────┼────────┤\n");

    for (name, strings) in licenses {
        let shown = truncate(name, 20);
        if strings.is_empty() {
            output.push_str(&format!("│ {:<20} │ {:<28} │ {:<6} │\n", shown, "(none)", "-"));
            continue;
        }

        for (index, license) in strings.iter().enumerate() {
            let blocked = violations.map_or(false, |v| {
                v.details.iter().any(|d| &d.dependency == name && &d.license == license)
            });
            let status = if blocked { "🚫" } else { "✅" };
            let shown_name = if index == 0 { shown.as_str() } else { "" };
            output.push_str(&format!(
                "│ {:<20} │ {:<28} │ {:<6} │\n",
                shown_name,
                truncate(license, 28),
                status
            ));
        }
    }

    output.push_str("└──────────────────────┴──────────────────────────────┴────────┘\n");
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}
