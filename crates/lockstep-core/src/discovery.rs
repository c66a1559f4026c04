//! Package discovery over glob patterns
//!
//! A [`FileFinder`] searches an ordered set of glob-style package locations
//! under a workspace root for a target file name. Results are absolute,
//! sorted within each pattern, and flattened in input-pattern order, so the
//! output is deterministic regardless of filesystem scheduling.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::glob_with;
pub use glob::MatchOptions;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::{ConfigError, LockstepError, Result};
use crate::manifest::{Manifest, MANIFEST_FILE_NAME};

/// Bound on concurrently running pattern searches; keeps file-descriptor
/// usage flat on large workspaces
const PATTERN_CONCURRENCY: usize = 4;

/// Glob-based file finder for workspace package locations
#[derive(Debug, Clone)]
pub struct FileFinder {
    root: PathBuf,
    patterns: Vec<String>,
    options: MatchOptions,
    /// Set when the pattern set carries a recursive wildcard; globstar
    /// matches inside node_modules are always filtered out
    ignore_node_modules: bool,
}

impl FileFinder {
    /// Create a finder for a workspace root and an ordered set of package
    /// location patterns.
    ///
    /// Fails fast with a configuration error when the pattern set combines a
    /// recursive wildcard with an explicit `node_modules` segment.
    pub fn new(root: impl Into<PathBuf>, patterns: Vec<String>) -> Result<Self> {
        let has_globstar = patterns.iter().any(|p| p.contains("**"));

        if has_globstar && patterns.iter().any(|p| p.contains("node_modules")) {
            return Err(ConfigError::GlobstarWithNodeModules.into());
        }

        Ok(Self {
            root: root.into(),
            patterns,
            options: MatchOptions {
                require_literal_separator: true,
                ..MatchOptions::new()
            },
            ignore_node_modules: has_globstar,
        })
    }

    /// Replace the default glob match options
    pub fn with_match_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Find every match for `file_name` across the patterns, up to four
    /// patterns searched concurrently
    pub async fn find(&self, file_name: &str) -> Result<Vec<PathBuf>> {
        self.find_mapped(file_name, |results| results).await
    }

    /// Like [`FileFinder::find`], transforming each pattern's result list
    /// before flattening
    pub async fn find_mapped<F>(&self, file_name: &str, mapper: F) -> Result<Vec<PathBuf>>
    where
        F: Fn(Vec<PathBuf>) -> Vec<PathBuf>,
    {
        let semaphore = Arc::new(Semaphore::new(PATTERN_CONCURRENCY));
        let mut handles = Vec::with_capacity(self.patterns.len());

        for pattern in &self.patterns {
            let semaphore = Arc::clone(&semaphore);
            let root = self.root.clone();
            let pattern = pattern.clone();
            let file_name = file_name.to_string();
            let options = self.options;
            let ignore_node_modules = self.ignore_node_modules;

            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| LockstepError::other(e.to_string()))?;

                tokio::task::spawn_blocking(move || {
                    run_pattern(&root, &pattern, &file_name, options, ignore_node_modules)
                })
                .await
                .map_err(|e| LockstepError::other(e.to_string()))?
            }));
        }

        // joining in spawn order keeps the flattened results in
        // input-pattern order no matter which search finishes first
        let mut flattened = Vec::new();
        for handle in handles {
            let results = handle
                .await
                .map_err(|e| LockstepError::other(e.to_string()))??;
            flattened.extend(mapper(results));
        }

        debug!(
            file_name,
            count = flattened.len(),
            "file finder completed"
        );
        Ok(flattened)
    }

    /// Synchronous form of [`FileFinder::find`] with identical ordering,
    /// normalization, and validation behavior
    pub fn find_sync(&self, file_name: &str) -> Result<Vec<PathBuf>> {
        self.find_sync_mapped(file_name, |results| results)
    }

    /// Synchronous form of [`FileFinder::find_mapped`]
    pub fn find_sync_mapped<F>(&self, file_name: &str, mapper: F) -> Result<Vec<PathBuf>>
    where
        F: Fn(Vec<PathBuf>) -> Vec<PathBuf>,
    {
        let mut flattened = Vec::new();
        for pattern in &self.patterns {
            let results = run_pattern(
                &self.root,
                pattern,
                file_name,
                self.options,
                self.ignore_node_modules,
            )?;
            flattened.extend(mapper(results));
        }

        Ok(flattened)
    }
}

/// Search one pattern joined with the target file name, returning absolute
/// paths sorted for cross-platform determinism
fn run_pattern(
    root: &Path,
    pattern: &str,
    file_name: &str,
    options: MatchOptions,
    ignore_node_modules: bool,
) -> Result<Vec<PathBuf>> {
    let full_pattern = join_pattern(root, pattern, file_name);

    let entries =
        glob_with(&full_pattern, options).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

    let mut results: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|path| {
            !ignore_node_modules
                || !path
                    .components()
                    .any(|component| component.as_os_str() == "node_modules")
        })
        .collect();

    // glob ordering is not guaranteed stable across platforms
    results.sort();

    Ok(results)
}

/// Glob patterns are always forward-slash joined, regardless of platform
fn join_pattern(root: &Path, pattern: &str, file_name: &str) -> String {
    let root = root.to_string_lossy().replace('\\', "/");
    format!(
        "{}/{}/{}",
        root.trim_end_matches('/'),
        pattern.trim_matches('/'),
        file_name
    )
}

/// Discover and load a [`Manifest`] for every package directory matching the
/// patterns, in finder order. Manifest load failures are fatal.
pub async fn discover_manifests(
    root: impl Into<PathBuf>,
    patterns: Vec<String>,
) -> Result<Vec<Manifest>> {
    let finder = FileFinder::new(root, patterns)?;
    let paths = finder.find(MANIFEST_FILE_NAME).await?;

    let mut manifests = Vec::with_capacity(paths.len());
    for path in &paths {
        manifests.push(Manifest::from_path(path)?);
    }

    info!(count = manifests.len(), "discovered manifests");
    Ok(manifests)
}
