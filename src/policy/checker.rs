use serde::Serialize;
use super::matcher::Blacklist;
use crate::license::LicenseMap;

/// A license string of a dependency that matched a blacklist entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub dependency: String,
    pub license: String,
    pub blacklist_entry: String,
}

impl Violation {
    pub fn summary(&self) -> String {
        format!("Blacklisted license in dependency '{}'", self.dependency)
    }

    pub fn detail(&self) -> String {
        format!(
            "Dependency '{}' has license '{}', which matches blacklist entry '{}'",
            self.dependency, self.license, self.blacklist_entry
        )
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ViolationSummary {
    pub total: usize,
    pub details: Vec<Violation>,
}

impl ViolationSummary {
    pub fn is_clean(&self) -> bool {
        self.total == 0
    }
}

impl Blacklist {
    /// Scan every license of every dependency against every entry.
    ///
    /// A single license string can produce several violations when it
    /// matches several entries.
    pub fn detect_violations(&self, licenses: &LicenseMap) -> ViolationSummary {
        let mut violations = Vec::new();

        for (dependency, strings) in licenses {
            for license in strings {
                for entry in self.matches(license) {
                    violations.push(Violation {
                        dependency: dependency.clone(),
                        license: license.clone(),
                        blacklist_entry: entry.to_string(),
                    });
                }
            }
        }

        ViolationSummary {
            total: violations.len(),
            details: violations,
        }
    }
}
