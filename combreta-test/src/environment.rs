//! Test environment management
//!
//! Provides an isolated pipeline layout with automatic cleanup using RAII.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const RAW_DIR: &str = "sequences_raw";
pub const CURATED_DIR: &str = "sequences_curated";
pub const CONSOLIDATED_DIR: &str = "alignment_input";

/// Temporary working directory laid out like a pipeline run
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("combreta-test")
            .context("Failed to create temporary directory")?;

        for dir in [RAW_DIR, CURATED_DIR] {
            std::fs::create_dir_all(temp_dir.path().join(dir))?;
        }

        Ok(Self { temp_dir })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root().join(RAW_DIR)
    }

    pub fn curated_dir(&self) -> PathBuf {
        self.root().join(CURATED_DIR)
    }

    /// Not created up front; the consolidator creates it
    pub fn consolidated_dir(&self) -> PathBuf {
        self.root().join(CONSOLIDATED_DIR)
    }

    /// Write a file relative to the environment root
    pub fn write_file(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn write_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.write_file(Path::new(RAW_DIR).join(name), content)
    }

    pub fn write_curated(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.write_file(Path::new(CURATED_DIR).join(name), content)
    }

    pub fn read_to_string(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.root().join(relative);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}
