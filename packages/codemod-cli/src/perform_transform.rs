//! Transform Driver
//!
//! Expands the input patterns, transforms files in parallel (files are
//! independent; the transform itself holds no cross-file state) and
//! reports per-file diagnostics.

use std::path::PathBuf;

use anyhow::Context;
use rayon::prelude::*;

use ember_codemod::transform::diagnostics::Diagnostic;
use ember_codemod::ModuleTransformer;

use crate::config::{CliOptions, RuntimeDataStore};

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub type_errors: Vec<String>,
    pub parse_failed: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct TransformSummary {
    pub transformed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

pub fn perform_transform(options: &CliOptions) -> anyhow::Result<TransformSummary> {
    let files = expand_patterns(&options.patterns)?;
    if files.is_empty() {
        anyhow::bail!("No files matched the given patterns");
    }

    let store = match &options.runtime_data_path {
        Some(path) => RuntimeDataStore::load(path)?,
        None => RuntimeDataStore::default(),
    };

    let transformer = ModuleTransformer::new(options.transform.clone());
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| transform_file(path, &transformer, &store, options.dry_run))
        .collect();

    let mut summary = TransformSummary::default();
    for outcome in &outcomes {
        report(outcome);
        if outcome.error.is_some() || outcome.parse_failed {
            summary.failed += 1;
        } else if outcome.changed {
            summary.transformed += 1;
        } else {
            summary.unchanged += 1;
        }
    }
    println!(
        "{} transformed, {} unchanged, {} failed",
        summary.transformed, summary.unchanged, summary.failed
    );
    Ok(summary)
}

fn transform_file(
    path: &PathBuf,
    transformer: &ModuleTransformer,
    store: &RuntimeDataStore,
    dry_run: bool,
) -> FileOutcome {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            return FileOutcome {
                path: path.clone(),
                changed: false,
                diagnostics: Vec::new(),
                type_errors: Vec::new(),
                parse_failed: false,
                error: Some(format!("Failed to read: {}", err)),
            }
        }
    };

    let runtime = store.for_file(path);
    let result = match transformer.transform_source_strict(
        &source,
        &path.to_string_lossy(),
        runtime,
    ) {
        Ok(result) => result,
        Err(err) => {
            return FileOutcome {
                path: path.clone(),
                changed: false,
                diagnostics: Vec::new(),
                type_errors: Vec::new(),
                parse_failed: true,
                error: Some(err.to_string()),
            }
        }
    };

    let mut error = None;
    let mut changed = false;
    if let Some(output) = &result.output {
        if *output != source {
            changed = true;
            if !dry_run {
                if let Err(err) = std::fs::write(path, output) {
                    error = Some(format!("Failed to write: {}", err));
                }
            }
        }
    }

    FileOutcome {
        path: path.clone(),
        changed,
        diagnostics: result.diagnostics,
        type_errors: result.type_errors,
        parse_failed: false,
        error,
    }
}

fn report(outcome: &FileOutcome) {
    let path = outcome.path.display();
    if let Some(error) = &outcome.error {
        eprintln!("[{}] {}", path, error);
    }
    for message in &outcome.type_errors {
        eprintln!("[{}] {}", path, message);
    }
    for diagnostic in &outcome.diagnostics {
        eprintln!("[{}] {}", path, diagnostic.message);
    }
}

fn expand_patterns(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let direct = PathBuf::from(pattern);
        if direct.is_file() {
            files.push(direct);
            continue;
        }
        let matches = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern '{}'", pattern))?;
        for entry in matches {
            let path = entry.with_context(|| format!("Failed to read glob entry for '{}'", pattern))?;
            if path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
