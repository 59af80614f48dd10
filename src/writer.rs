//! Output paths and file writing.
//!
//! Every line goes through [`StubWriter::write_line`], which strips trailing
//! spaces and tabs before it reaches the file.

use crate::model::Namespace;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const STUB_EXTENSION: &str = "rb";

/// File name used for the root pseudo-namespace.
pub const TOP_LEVEL_STUB: &str = "_top_level.rb";

/// Stub path relative to the output root: `Sketchup::Model` →
/// `Sketchup/Model.rb`.
pub fn stub_relative_path(ns: &Namespace) -> PathBuf {
    if ns.is_root() {
        return PathBuf::from(TOP_LEVEL_STUB);
    }
    let mut path: PathBuf = ns.path.split("::").filter(|s| !s.is_empty()).collect();
    path.set_extension(STUB_EXTENSION);
    path
}

/// Line-oriented writer that normalizes trailing whitespace.
pub struct StubWriter<W: Write> {
    inner: W,
}

impl<W: Write> StubWriter<W> {
    pub fn new(inner: W) -> Self {
        StubWriter { inner }
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_all(line.trim_end_matches([' ', '\t']).as_bytes())?;
        self.inner.write_all(b"\n")
    }

    /// Write `text` line by line. A final line without `\n` still gets one.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            self.write_line(line)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Create parent directories as needed and overwrite `path` with `content`.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = StubWriter::new(BufWriter::new(file));
    writer
        .write_text(content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}
