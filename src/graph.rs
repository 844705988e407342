//! In-memory project graph used to run elements outside the orchestrator.
//!
//! Scope traversal follows the orchestrator's rules: `Build` walks a node's
//! build dependencies and their runtime closures without the node itself,
//! `Run` walks the runtime closure and ends with the node, `All` walks
//! everything and ends with the node. Dependencies always come before their
//! dependents.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::diagnostics::TracingDiagnostics;
use crate::error::ElementError;
use crate::host::{Dependency, DependencyRef, ElementHost, ElementId, Scope};

/// One `[[element]]` entry of a project file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ElementSpec {
    pub name: String,
    #[serde(default)]
    pub build_depends: Vec<String>,
    #[serde(default)]
    pub runtime_depends: Vec<String>,
    /// Public data domains published by the element
    #[serde(default)]
    pub public: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(rename = "element", default)]
    elements: Vec<ElementSpec>,
}

#[derive(Debug)]
struct Node {
    name: String,
    build: Vec<ElementId>,
    runtime: Vec<ElementId>,
    public: IndexMap<String, serde_json::Value>,
}

#[derive(Debug)]
struct GraphData {
    nodes: Vec<Node>,
    by_name: HashMap<String, ElementId>,
}

const BUILD_BIT: u8 = 0b01;
const RUN_BIT: u8 = 0b10;

fn scope_bits(scope: Scope) -> u8 {
    match scope {
        Scope::Build => BUILD_BIT,
        Scope::Run => RUN_BIT,
        Scope::All => BUILD_BIT | RUN_BIT,
    }
}

impl GraphData {
    fn node(&self, id: ElementId) -> &Node {
        &self.nodes[id.0]
    }

    fn walk(
        &self,
        id: ElementId,
        scope: Scope,
        recurse: bool,
        recursed: bool,
        visited: &mut HashMap<ElementId, u8>,
        out: &mut Vec<ElementId>,
    ) {
        let bits = scope_bits(scope);
        let should_yield = match visited.entry(id) {
            Entry::Occupied(mut seen) => {
                if *seen.get() & bits == bits {
                    return;
                }
                *seen.get_mut() |= bits;
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(bits);
                true
            }
        };

        let node = self.node(id);
        if recurse || !recursed {
            match scope {
                Scope::All => {
                    for &dep in &node.build {
                        self.walk(dep, Scope::All, recurse, true, visited, out);
                    }
                    for &dep in node.runtime.iter().filter(|dep| !node.build.contains(dep)) {
                        self.walk(dep, Scope::All, recurse, true, visited, out);
                    }
                }
                Scope::Build => {
                    for &dep in &node.build {
                        self.walk(dep, Scope::Run, recurse, true, visited, out);
                    }
                }
                Scope::Run => {
                    for &dep in &node.runtime {
                        self.walk(dep, Scope::Run, recurse, true, visited, out);
                    }
                }
            }
        }

        if should_yield && (recurse || recursed) && scope != Scope::Build {
            out.push(id);
        }
    }

    fn dependencies(&self, id: ElementId, scope: Scope, recurse: bool) -> Vec<ElementId> {
        let mut visited = HashMap::new();
        let mut out = Vec::new();
        self.walk(id, scope, recurse, false, &mut visited, &mut out);
        out
    }
}

/// A loaded, validated project graph.
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    data: Arc<GraphData>,
}

impl ProjectGraph {
    /// Build a graph from element specs.
    ///
    /// Duplicate names, dangling dependency names and cycles are rejected.
    pub fn from_specs(specs: Vec<ElementSpec>) -> Result<Self, ElementError> {
        let mut by_name = HashMap::new();
        for (index, spec) in specs.iter().enumerate() {
            if by_name.insert(spec.name.clone(), ElementId(index)).is_some() {
                return Err(ElementError::Graph(format!("duplicate element '{}'", spec.name)));
            }
        }

        let resolve = |owner: &str, names: &[String]| -> Result<Vec<ElementId>, ElementError> {
            names
                .iter()
                .map(|name| {
                    by_name.get(name).copied().ok_or_else(|| {
                        ElementError::Graph(format!("element '{}' depends on unknown element '{}'", owner, name))
                    })
                })
                .collect()
        };

        let mut nodes = Vec::with_capacity(specs.len());
        for spec in specs {
            let build = resolve(&spec.name, &spec.build_depends)?;
            let runtime = resolve(&spec.name, &spec.runtime_depends)?;
            nodes.push(Node {
                name: spec.name,
                build,
                runtime,
                public: spec.public,
            });
        }

        let data = GraphData { nodes, by_name };
        check_acyclic(&data)?;
        debug!(elements = data.nodes.len(), "project graph loaded");

        Ok(Self { data: Arc::new(data) })
    }

    /// Load a project graph from a TOML project file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file: {}", path.display()))?;

        let project: ProjectFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse project file: {}", path.display()))?;

        Self::from_specs(project.elements)
            .with_context(|| format!("Invalid project file: {}", path.display()))
    }

    /// Handle for the element named `name`.
    pub fn element(&self, name: &str) -> Option<DependencyRef> {
        let id = *self.data.by_name.get(name)?;
        Some(self.handle(id))
    }

    fn handle(&self, id: ElementId) -> DependencyRef {
        Arc::new(LocalElement {
            graph: Arc::clone(&self.data),
            id,
        })
    }

    fn handles(&self, ids: Vec<ElementId>) -> Vec<DependencyRef> {
        ids.into_iter().map(|id| self.handle(id)).collect()
    }
}

fn check_acyclic(data: &GraphData) -> Result<(), ElementError> {
    // 0 = unvisited, 1 = on stack, 2 = done
    fn visit(data: &GraphData, id: ElementId, state: &mut [u8]) -> Result<(), ElementError> {
        match state[id.0] {
            1 => {
                return Err(ElementError::Graph(format!(
                    "dependency cycle through element '{}'",
                    data.node(id).name
                )))
            }
            2 => return Ok(()),
            _ => {}
        }
        state[id.0] = 1;
        let node = data.node(id);
        for &dep in node.build.iter().chain(node.runtime.iter()) {
            visit(data, dep, state)?;
        }
        state[id.0] = 2;
        Ok(())
    }

    let mut state = vec![0u8; data.nodes.len()];
    for index in 0..data.nodes.len() {
        visit(data, ElementId(index), &mut state)?;
    }
    Ok(())
}

/// Dependency handle into a [`ProjectGraph`].
struct LocalElement {
    graph: Arc<GraphData>,
    id: ElementId,
}

impl Dependency for LocalElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn name(&self) -> &str {
        &self.graph.node(self.id).name
    }

    fn dependencies(&self, scope: Scope, recurse: bool) -> Vec<DependencyRef> {
        let graph = ProjectGraph {
            data: Arc::clone(&self.graph),
        };
        graph.handles(self.graph.dependencies(self.id, scope, recurse))
    }

    fn public_data(&self, domain: &str) -> Option<serde_json::Value> {
        self.graph.node(self.id).public.get(domain).cloned()
    }
}

/// Host context binding one element of a [`ProjectGraph`] as the element
/// being built.
pub struct LocalHost<'a> {
    graph: &'a ProjectGraph,
    target: ElementId,
    diagnostics: TracingDiagnostics,
}

impl<'a> LocalHost<'a> {
    pub fn new(graph: &'a ProjectGraph, target: &str) -> Result<Self, ElementError> {
        let target = graph
            .data
            .by_name
            .get(target)
            .copied()
            .ok_or_else(|| ElementError::Graph(format!("no element named '{}' in project", target)))?;

        Ok(Self {
            graph,
            target,
            diagnostics: TracingDiagnostics::new(graph.data.node(target).name.clone()),
        })
    }

    pub fn diagnostics(&self) -> &TracingDiagnostics {
        &self.diagnostics
    }
}

impl ElementHost for LocalHost<'_> {
    fn dependencies(&self, scope: Scope, recurse: bool) -> Vec<DependencyRef> {
        self.graph
            .handles(self.graph.data.dependencies(self.target, scope, recurse))
    }

    fn warn(&self, summary: &str, detail: &str) {
        self.diagnostics.warn(summary, detail);
    }
}
