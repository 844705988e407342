//! Element that gathers dependency licenses into a JSON report and, in its
//! denylist form, fails the build when a dependency carries a blacklisted
//! license.

use std::path::MAIN_SEPARATOR;

use serde_json::json;
use tracing::{debug, info};

use crate::config::{ConfigNode, DependencyScope, LicenseConfig};
use crate::element::Element;
use crate::error::{ElementError, Result};
use crate::host::{ElementHost, Sandbox};
use crate::license::{aggregate_licenses, collect_dependencies, LicenseMap};
use crate::output::{validate_artifact_path, write_report};
use crate::policy::{Blacklist, ViolationSummary};

/// Which configuration surface the element accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Report only: `path`, `dependency_scope`
    Report,
    /// Report and enforce: `path`, `dependency_scope`, `blacklist`
    Denylist,
}

impl Variant {
    /// Element kind name the variant is registered under.
    pub fn kind(self) -> &'static str {
        match self {
            Variant::Report => "collect_licenses",
            Variant::Denylist => "assert_license",
        }
    }

    pub fn allowed_keys(self) -> &'static [&'static str] {
        match self {
            Variant::Report => &["path", "dependency_scope"],
            Variant::Denylist => &["path", "dependency_scope", "blacklist"],
        }
    }
}

/// Licenses gathered for one build, with the blacklist scan if one ran.
#[derive(Debug)]
pub struct Audit {
    pub licenses: LicenseMap,
    pub violations: Option<ViolationSummary>,
}

#[derive(Debug, Clone)]
pub struct LicenseElement {
    variant: Variant,
    config: Option<LicenseConfig>,
}

impl LicenseElement {
    pub fn new(variant: Variant) -> Self {
        Self { variant, config: None }
    }

    pub fn report() -> Self {
        Self::new(Variant::Report)
    }

    pub fn denylist() -> Self {
        Self::new(Variant::Denylist)
    }

    pub fn config(&self) -> Result<&LicenseConfig> {
        self.config.as_ref().ok_or(ElementError::NotConfigured)
    }

    /// Collect and check licenses without writing anything.
    ///
    /// Each violation is reported through the host's warning channel.
    pub fn audit(&self, host: &dyn ElementHost) -> Result<Audit> {
        let config = self.config()?;

        let deps = collect_dependencies(host, config.dependency_scope.host_scope());
        let licenses = aggregate_licenses(deps)?;
        debug!(dependencies = licenses.len(), scope = %config.dependency_scope, "collected licenses");

        let violations = config.blacklist.as_ref().map(|entries| {
            let summary = Blacklist::new(entries.clone()).detect_violations(&licenses);
            for violation in &summary.details {
                host.warn(&violation.summary(), &violation.detail());
            }
            summary
        });

        Ok(Audit { licenses, violations })
    }
}

impl Element for LicenseElement {
    fn configure(&mut self, node: &dyn ConfigNode) -> Result<()> {
        node.validate_keys(self.variant.allowed_keys())?;

        let path = node.string_member("path")?;
        validate_artifact_path(&path)?;
        let dependency_scope = DependencyScope::parse(&node.string_member("dependency_scope")?)?;
        let blacklist = match self.variant {
            Variant::Report => None,
            Variant::Denylist => Some(node.list_member("blacklist")?),
        };

        debug!(%path, scope = %dependency_scope, "configured license element");
        self.config = Some(LicenseConfig {
            path,
            dependency_scope,
            blacklist,
        });
        Ok(())
    }

    // License data of dependencies is not part of the key, only configuration.
    fn unique_key(&self) -> Result<serde_json::Value> {
        let config = self.config()?;

        let mut key = json!({
            "scope": config.dependency_scope.to_string(),
            "path": config.path,
        });
        if let Some(blacklist) = &config.blacklist {
            key["blacklist"] = json!(blacklist);
        }
        Ok(key)
    }

    fn assemble(&self, host: &dyn ElementHost, sandbox: &dyn Sandbox) -> Result<String> {
        let config = self.config()?;
        let audit = self.audit(host)?;

        // Nothing is written when the scan failed.
        if let Some(violations) = &audit.violations {
            if !violations.is_clean() {
                return Err(ElementError::Blacklisted {
                    count: violations.total,
                });
            }
        }

        let written = write_report(sandbox.directory(), &config.path, &audit.licenses)?;
        info!(path = %written.display(), "license assembly complete");

        Ok(MAIN_SEPARATOR.to_string())
    }
}
