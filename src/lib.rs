pub mod error;
pub mod host;
pub mod config;
pub mod license;
pub mod policy;
pub mod output;
pub mod element;
pub mod assert_license;
pub mod graph;
pub mod sandbox;
pub mod diagnostics;

// Re-export main types for easy access
pub use assert_license::{Audit, LicenseElement, Variant};
pub use config::{ConfigNode, DependencyScope, LicenseConfig};
pub use element::{setup, Element, ElementFactory, PluginRegistry};
pub use error::ElementError;
pub use host::{Dependency, DependencyRef, ElementHost, ElementId, Sandbox, Scope};
pub use license::{LicenseMap, DependencyWalk};
pub use policy::{license_matches, Blacklist, Violation, ViolationSummary};
