//! Element lifecycle and plugin registration.

use indexmap::IndexMap;

use crate::assert_license::{LicenseElement, Variant};
use crate::config::ConfigNode;
use crate::error::{ElementError, Result};
use crate::host::{ElementHost, Sandbox};

/// Hooks the host calls, in order, for every build of an element.
pub trait Element {
    /// Validate and store the element's configuration.
    fn configure(&mut self, node: &dyn ConfigNode) -> Result<()>;

    fn preflight(&self) -> Result<()> {
        Ok(())
    }

    /// Key the host uses to decide whether a cached build is reusable.
    fn unique_key(&self) -> Result<serde_json::Value>;

    fn configure_sandbox(&self, _sandbox: &dyn Sandbox) -> Result<()> {
        Ok(())
    }

    fn stage(&self, _sandbox: &dyn Sandbox) -> Result<()> {
        Ok(())
    }

    /// Produce the element's artifact and return the root of its output
    /// inside the sandbox.
    fn assemble(&self, host: &dyn ElementHost, sandbox: &dyn Sandbox) -> Result<String>;
}

pub type ElementFactory = fn() -> Box<dyn Element>;

fn new_assert_license() -> Box<dyn Element> {
    Box::new(LicenseElement::new(Variant::Denylist))
}

/// Entry point the host's plugin loader looks up.
pub fn setup() -> ElementFactory {
    new_assert_license
}

/// Maps element kind names to the license element variant they build.
pub struct PluginRegistry {
    variants: IndexMap<&'static str, Variant>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            variants: IndexMap::new(),
        }
    }

    /// Registry holding the element kinds this crate provides.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Variant::Report);
        registry.register(Variant::Denylist);
        registry
    }

    pub fn register(&mut self, variant: Variant) {
        self.variants.insert(variant.kind(), variant);
    }

    /// Unconfigured license element for `kind`.
    pub fn license_element(&self, kind: &str) -> Result<LicenseElement> {
        self.variants
            .get(kind)
            .map(|variant| LicenseElement::new(*variant))
            .ok_or_else(|| ElementError::UnknownKind(kind.to_string()))
    }

    pub fn create(&self, kind: &str) -> Result<Box<dyn Element>> {
        Ok(Box::new(self.license_element(kind)?))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.keys().copied()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
