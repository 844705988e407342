use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

pub struct TestProject {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_assert-license").to_string();

        Self { dir, binary_path }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn write_element(&self, name: &str, kind: &str, config: &str) -> PathBuf {
        self.write(name, &format!("kind = \"{}\"\n\n[config]\n{}", kind, config))
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run assert-license")
    }
}

/// A small system: an app built with a compiler, running on zlib and libc.
pub const SYSTEM_PROJECT: &str = r#"
[[element]]
name = "libc"

[element.public.licenses]
license-strings = ["LGPL-2.1-or-later"]

[[element]]
name = "zlib"
runtime-depends = ["libc"]

[element.public.licenses]
license-strings = ["Zlib"]

[[element]]
name = "gcc"
runtime-depends = ["libc"]

[element.public.licenses]
license-strings = ["GPL-3.0-or-later", "GCC-exception-3.1"]

[[element]]
name = "app"
build-depends = ["gcc", "zlib"]
runtime-depends = ["zlib"]

[element.public.licenses]
license-strings = ["MIT"]

[[element]]
name = "licenses"
build-depends = ["app"]
"#;
