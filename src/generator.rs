//! One generation run: every namespace to its stub file, then the manifest.

use crate::registry::{Filter, Registry};
use crate::render::manifest::{self, AUTOLOAD_DIR};
use crate::render::stub::StubRenderer;
use crate::writer::{self, stub_relative_path, STUB_EXTENSION};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_AUTOLOAD_NAME: &str = "sketchup";

/// Files written by [`Generator::run`].
#[derive(Debug)]
pub struct Summary {
    /// Stub files in registry order.
    pub stubs: Vec<PathBuf>,
    pub manifest: PathBuf,
}

pub struct Generator<'r> {
    registry: &'r dyn Registry,
    filter: &'r dyn Filter,
    output: PathBuf,
    autoload_name: String,
}

impl<'r> Generator<'r> {
    pub fn new(registry: &'r dyn Registry, filter: &'r dyn Filter, output: impl Into<PathBuf>) -> Self {
        Generator {
            registry,
            filter,
            output: output.into(),
            autoload_name: DEFAULT_AUTOLOAD_NAME.to_string(),
        }
    }

    pub fn with_autoload_name(mut self, name: &str) -> Self {
        self.autoload_name = name.to_string();
        self
    }

    /// Write all stubs, then the manifest. Stops at the first filesystem
    /// error; files already written stay on disk.
    pub fn run(&self) -> Result<Summary> {
        fs::create_dir_all(&self.output).with_context(|| {
            format!("failed to create output directory: {}", self.output.display())
        })?;
        let root = fs::canonicalize(&self.output)
            .with_context(|| format!("failed to resolve {}", self.output.display()))?;

        let renderer = StubRenderer::new(self.registry, self.filter);
        let mut written = Vec::new();
        for ns in self.registry.namespaces(self.filter) {
            let relative = stub_relative_path(ns);
            let path = root.join(&relative);
            writer::write_file(&path, &renderer.render(ns))?;
            debug!(namespace = %ns.path, path = %path.display(), "wrote stub");
            written.push(relative);
        }

        let stubs = manifest::discover_stubs(&root, &written)?;
        let manifest_path = root
            .join(AUTOLOAD_DIR)
            .join(format!("{}.{}", self.autoload_name, STUB_EXTENSION));
        writer::write_file(&manifest_path, &manifest::render_manifest(&stubs))?;
        debug!(path = %manifest_path.display(), entries = stubs.len(), "wrote autoload manifest");

        Ok(Summary {
            stubs: written.iter().map(|r| root.join(r)).collect(),
            manifest: manifest_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{AcceptAll, MemoryRegistry};
    use tempfile::TempDir;

    const REGISTRY: &str = r#"{"namespaces": [
        {"path": "Widgets::Gear", "kind": "class",
         "constants": [{"name": "SPEED_LOW"}, {"name": "SPEED_HIGH"}, {"name": "COLOR_RED"}],
         "methods": [{"name": "spin", "parameters": [["count", "1"]]}]},
        {"path": "", "kind": "root", "methods": [{"name": "puts"}]},
        {"path": "Geom", "kind": "module"}
    ]}"#;

    fn read(path: &std::path::Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn writes_one_stub_per_namespace_and_manifest() {
        let dir = TempDir::new().unwrap();
        let reg = MemoryRegistry::from_json(REGISTRY).unwrap();
        let summary = Generator::new(&reg, &AcceptAll, dir.path()).run().unwrap();

        assert_eq!(summary.stubs.len(), 3);
        assert!(summary.stubs[0].ends_with("Widgets/Gear.rb"));
        assert!(summary.stubs[1].ends_with("_top_level.rb"));
        assert!(summary.stubs[2].ends_with("Geom.rb"));
        assert!(summary.manifest.ends_with("autoload/sketchup.rb"));

        let manifest = read(&summary.manifest);
        assert_eq!(manifest.lines().count(), 3);
        for line in [
            "require_relative '../Widgets/Gear'",
            "require_relative '../_top_level'",
            "require_relative '../Geom'",
        ] {
            assert_eq!(manifest.lines().filter(|l| *l == line).count(), 1, "{}", line);
        }
    }

    #[test]
    fn reruns_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let reg = MemoryRegistry::from_json(REGISTRY).unwrap();
        let generator = Generator::new(&reg, &AcceptAll, dir.path());

        let first = generator.run().unwrap();
        let before: Vec<String> = first.stubs.iter().map(|p| read(p)).collect();
        let manifest_before = read(&first.manifest);

        let second = generator.run().unwrap();
        let after: Vec<String> = second.stubs.iter().map(|p| read(p)).collect();
        assert_eq!(before, after);
        assert_eq!(manifest_before, read(&second.manifest));
    }

    #[test]
    fn empty_registry_still_writes_manifest() {
        let dir = TempDir::new().unwrap();
        let reg = MemoryRegistry::from_json("{}").unwrap();
        let summary = Generator::new(&reg, &AcceptAll, dir.path().join("out"))
            .with_autoload_name("api")
            .run()
            .unwrap();
        assert!(summary.stubs.is_empty());
        assert!(summary.manifest.ends_with("autoload/api.rb"));
        assert_eq!(read(&summary.manifest), "");
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let reg = MemoryRegistry::from_json(REGISTRY).unwrap();
        assert!(Generator::new(&reg, &AcceptAll, blocker.join("out")).run().is_err());
    }
}
