use std::collections::HashSet;
use std::vec;

use tracing::debug;

use crate::host::{Dependency, DependencyRef, ElementHost, ElementId, Scope};

/// Deduplicated two-hop walk over an element's dependencies.
///
/// The first hop is always the element's direct build dependencies. After
/// each of those, if a secondary scope is set, that dependency's own
/// dependencies under the scope are walked. Every handle is yielded at most
/// once, in first-encounter order.
pub struct DependencyWalk {
    direct: vec::IntoIter<DependencyRef>,
    nested: vec::IntoIter<DependencyRef>,
    scope: Option<Scope>,
    visited: HashSet<ElementId>,
}

impl DependencyWalk {
    pub fn new(host: &dyn ElementHost, scope: Option<Scope>) -> Self {
        Self {
            direct: host.dependencies(Scope::Build, false).into_iter(),
            nested: Vec::new().into_iter(),
            scope,
            visited: HashSet::new(),
        }
    }

    fn first_visit(&mut self, dep: &DependencyRef) -> bool {
        self.visited.insert(dep.id())
    }
}

impl Iterator for DependencyWalk {
    type Item = DependencyRef;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(dep) = self.nested.next() {
                if self.first_visit(&dep) {
                    return Some(dep);
                }
                continue;
            }

            let build_dep = self.direct.next()?;
            if let Some(scope) = self.scope {
                debug!(dependency = build_dep.name(), %scope, "walking dependency closure");
                self.nested = build_dep.dependencies(scope, true).into_iter();
            }
            if self.first_visit(&build_dep) {
                return Some(build_dep);
            }
        }
    }
}

/// Collect the dependencies to report on for the element being built.
pub fn collect_dependencies(host: &dyn ElementHost, scope: Option<Scope>) -> DependencyWalk {
    DependencyWalk::new(host, scope)
}
