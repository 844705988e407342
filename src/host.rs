//! Interfaces consumed from the host build orchestrator.
//!
//! The element never owns the dependency graph, the sandbox or the
//! diagnostics channel. It only sees them through these traits, which the
//! orchestrator (or [`crate::graph`] when running locally) implements.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Traversal mode over the host's dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Build dependencies of a node and their runtime closure
    Build,
    /// Runtime closure of a node, including the node itself
    Run,
    /// Everything reachable, including the node itself
    All,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::Build => "build",
            Scope::Run => "run",
            Scope::All => "all",
        };
        f.write_str(name)
    }
}

/// Opaque identity of a node in the host graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Shared handle to a dependency node.
pub type DependencyRef = Arc<dyn Dependency>;

/// A node of the host graph as seen from a dependent element.
pub trait Dependency: Send + Sync {
    /// Stable identity used for deduplication.
    fn id(&self) -> ElementId;

    fn name(&self) -> &str;

    /// Dependencies of this node under `scope`.
    ///
    /// With `recurse == false` only direct dependencies are returned.
    fn dependencies(&self, scope: Scope, recurse: bool) -> Vec<DependencyRef>;

    /// Public data published by this node under `domain`, if any.
    fn public_data(&self, domain: &str) -> Option<serde_json::Value>;
}

/// The host as seen by the element being built.
pub trait ElementHost {
    /// Dependencies of the element being built.
    fn dependencies(&self, scope: Scope, recurse: bool) -> Vec<DependencyRef>;

    /// Non-fatal diagnostic channel.
    fn warn(&self, summary: &str, detail: &str);
}

/// Filesystem staging area the element writes its artifact into.
pub trait Sandbox {
    fn directory(&self) -> &Path;
}
