use std::path::{Path, PathBuf};

use crate::host::Sandbox;

/// Sandbox backed by a plain directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectorySandbox {
    root: PathBuf,
}

impl DirectorySandbox {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Sandbox for DirectorySandbox {
    fn directory(&self) -> &Path {
        &self.root
    }
}
