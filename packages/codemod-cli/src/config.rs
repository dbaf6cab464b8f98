//! CLI Configuration
//!
//! Run options and the on-disk runtime-data store: a JSON object mapping
//! file paths to the runtime metadata record gathered for that file.

use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;

use ember_codemod::{RuntimeData, TransformOptions};

#[derive(Debug, Clone)]
pub struct CliOptions {
    /// Files or glob patterns to transform
    pub patterns: Vec<String>,
    /// Path to the runtime-data JSON file, when available
    pub runtime_data_path: Option<String>,
    /// Report what would change without writing anything
    pub dry_run: bool,
    pub transform: TransformOptions,
}

/// Runtime metadata for a whole run, keyed by file path
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeDataStore {
    #[serde(flatten)]
    files: IndexMap<String, RuntimeData>,
}

impl RuntimeDataStore {
    pub fn load(path: &str) -> anyhow::Result<RuntimeDataStore> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read runtime data from {}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse runtime data in {}", path))
    }

    /// Look up a record by exact path, falling back to a suffix match so
    /// absolute and project-relative paths interoperate
    pub fn for_file(&self, path: &Path) -> Option<&RuntimeData> {
        let path_str = path.to_string_lossy();
        if let Some(data) = self.files.get(path_str.as_ref()) {
            return Some(data);
        }
        self.files
            .iter()
            .find(|(key, _)| path_str.ends_with(key.as_str()) || key.ends_with(path_str.as_ref()))
            .map(|(_, data)| data)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
