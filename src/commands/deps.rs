use anyhow::Result;
use std::path::Path;
use assert_license::graph::{LocalHost, ProjectGraph};
use assert_license::license::collect_dependencies;
use assert_license::{Dependency, DependencyScope};

pub fn handle_deps(project: &Path, target: &str, scope: &str) -> Result<()> {
    let graph = ProjectGraph::load(project)?;
    let scope = DependencyScope::parse(scope)?;
    let host = LocalHost::new(&graph, target)?;

    for dep in collect_dependencies(&host, scope.host_scope()) {
        println!("{}", dep.name());
    }

    Ok(())
}
