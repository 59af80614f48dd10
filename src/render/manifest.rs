//! Autoload manifest: one `require_relative` per generated stub.

use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Directory under the output root that holds the manifest.
pub const AUTOLOAD_DIR: &str = "autoload";

/// Find stub files under `root` in glob order, keeping only those in
/// `written` (paths relative to `root`). Anything in [`AUTOLOAD_DIR`] is
/// skipped; stubs left over from earlier runs are reported and skipped.
pub fn discover_stubs(root: &Path, written: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let root_str = root
        .to_str()
        .ok_or_else(|| anyhow!("output path is not valid UTF-8: {}", root.display()))?;
    let pattern = format!("{}/**/*.{}", glob::Pattern::escape(root_str), crate::writer::STUB_EXTENSION);

    let written: HashSet<&Path> = written.iter().map(PathBuf::as_path).collect();
    let mut found = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        let path = entry.context("failed to scan output directory")?;
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if relative.starts_with(AUTOLOAD_DIR) {
            continue;
        }
        if !written.contains(relative) {
            warn!(path = %path.display(), "skipping stale stub not written in this run");
            continue;
        }
        found.push(relative.to_path_buf());
    }
    Ok(found)
}

/// `require_relative '../Sketchup/Model'` for a stub at `Sketchup/Model.rb`.
pub fn require_line(relative: &Path) -> String {
    let mut parts: Vec<String> = vec!["..".to_string()];
    for component in relative.with_extension("").components() {
        if let Component::Normal(part) = component {
            parts.push(part.to_string_lossy().into_owned());
        }
    }
    format!("require_relative '{}'", parts.join("/"))
}

/// Manifest text for the given stubs (relative to the output root).
pub fn render_manifest(stubs: &[PathBuf]) -> String {
    stubs
        .iter()
        .map(|s| format!("{}\n", require_line(s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn require_line_is_relative_to_autoload_dir() {
        assert_eq!(
            require_line(Path::new("Sketchup/Model.rb")),
            "require_relative '../Sketchup/Model'"
        );
        assert_eq!(
            require_line(Path::new("_top_level.rb")),
            "require_relative '../_top_level'"
        );
    }

    #[test]
    fn empty_manifest() {
        assert_eq!(render_manifest(&[]), "");
    }

    #[test]
    fn discovers_written_stubs_only() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "Widgets/Gear.rb");
        touch(root, "Geom.rb");
        touch(root, "autoload/sketchup.rb");
        let written = vec![PathBuf::from("Widgets/Gear.rb"), PathBuf::from("Geom.rb")];

        let mut found = discover_stubs(root, &written).unwrap();
        found.sort();
        assert_eq!(found, vec![PathBuf::from("Geom.rb"), PathBuf::from("Widgets/Gear.rb")]);
    }

    #[test]
    fn skips_stale_stubs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "Old.rb");
        touch(root, "New.rb");

        let found = discover_stubs(root, &[PathBuf::from("New.rb")]).unwrap();
        assert_eq!(found, vec![PathBuf::from("New.rb")]);
    }
}
