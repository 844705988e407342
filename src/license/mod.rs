use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::ElementError;
use crate::host::Dependency;

pub mod collector;

// Re-export from collector
pub use collector::{collect_dependencies, DependencyWalk};

/// Public data domain dependencies publish their licenses under.
pub const LICENSES_DOMAIN: &str = "licenses";

/// Key inside the `licenses` domain holding the license strings.
pub const LICENSE_STRINGS_KEY: &str = "license-strings";

/// Dependency name to published license strings, in collection order.
pub type LicenseMap = IndexMap<String, Vec<String>>;

/// Read the license strings a dependency publishes.
pub fn read_license_strings(dep: &dyn Dependency) -> Result<Vec<String>, ElementError> {
    let missing = |reason: &str| ElementError::MissingLicenseData {
        dependency: dep.name().to_string(),
        reason: reason.to_string(),
    };

    let domain = dep
        .public_data(LICENSES_DOMAIN)
        .ok_or_else(|| missing("no 'licenses' public data"))?;

    let strings = match domain.get(LICENSE_STRINGS_KEY) {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(missing("'license-strings' is not a list")),
        None => return Err(missing("'licenses' has no 'license-strings' entry")),
    };

    strings
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| missing("'license-strings' contains a non-string entry"))
        })
        .collect()
}

/// Build the license map for a sequence of dependencies.
pub fn aggregate_licenses<I, D>(deps: I) -> Result<LicenseMap, ElementError>
where
    I: IntoIterator<Item = D>,
    D: AsRef<dyn Dependency>,
{
    let mut licenses = LicenseMap::new();

    for dep in deps {
        let dep = dep.as_ref();
        let strings = read_license_strings(dep)?;
        debug!(dependency = dep.name(), count = strings.len(), "read license strings");

        if licenses.insert(dep.name().to_string(), strings).is_some() {
            debug!(dependency = dep.name(), "dependency name reported twice, keeping last");
        }
    }

    Ok(licenses)
}
