//! Lock-file synchronization
//!
//! Propagates a package's new version into the workspace lock file, for both
//! the classic (`package-lock.json`) and workspace-aware (`pnpm-lock.yaml`)
//! families. Loading and saving are best-effort: a missing lock file is a
//! valid state and I/O failures are swallowed, in contrast to manifest I/O
//! which is load-bearing and propagates.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use lockstep_core::Manifest;

use crate::types::{LockfileInfo, PackageManager};

/// File name of the classic-family lock file
pub const NPM_LOCKFILE_NAME: &str = "package-lock.json";
/// File name of the workspace-aware-family lock file
pub const PNPM_LOCKFILE_NAME: &str = "pnpm-lock.yaml";

fn lockfile_version(json: &Value) -> u32 {
    // pnpm declares versions like 5.4 or "6.0"; coerce and truncate
    match json.get("lockfileVersion") {
        Some(Value::Number(n)) => n.as_f64().map_or(1, |v| v as u32),
        Some(Value::String(s)) => s.parse::<f64>().map_or(1, |v| v as u32),
        _ => 1,
    }
}

async fn load_npm_lockfile(root: &Path) -> Option<LockfileInfo> {
    let path = root.join(NPM_LOCKFILE_NAME);
    let content = tokio::fs::read_to_string(&path).await.ok()?;
    let json: Value = serde_json::from_str(&content).ok()?;
    let version = lockfile_version(&json);

    Some(LockfileInfo {
        json,
        version,
        path,
        manager: PackageManager::Npm,
    })
}

async fn load_pnpm_lockfile(root: &Path) -> Option<LockfileInfo> {
    let path = root.join(PNPM_LOCKFILE_NAME);
    let content = tokio::fs::read_to_string(&path).await.ok()?;
    let json: Value = serde_yaml::from_str(&content).ok()?;
    let version = lockfile_version(&json);

    Some(LockfileInfo {
        json,
        version,
        path,
        manager: PackageManager::Pnpm,
    })
}

/// Probe a workspace root for a lock file.
///
/// A declared manager is honored; otherwise the classic family is tried
/// first with the workspace-aware family as fallback. Absence is a valid,
/// expected state and never an error.
pub async fn load_lockfile(
    root: impl AsRef<Path>,
    manager: Option<PackageManager>,
) -> Option<LockfileInfo> {
    let root = root.as_ref();
    let mut lockfile = None;

    if manager.is_none() || manager == Some(PackageManager::Npm) {
        lockfile = load_npm_lockfile(root).await;
    }

    if manager == Some(PackageManager::Pnpm) || lockfile.is_none() {
        lockfile = load_pnpm_lockfile(root).await;
    }

    if let Some(info) = &lockfile {
        debug!(
            path = %info.path.display(),
            manager = %info.manager,
            version = info.version,
            "loaded lock file"
        );
    }

    lockfile
}

async fn write_json_file(path: &Path, json: &Value) -> std::io::Result<()> {
    let mut content = serde_json::to_string_pretty(json)?;
    content.push('\n');
    tokio::fs::write(path, content).await
}

/// Sync a per-package `package-lock.json` beside the manifest with the
/// manifest's version (classic family, layout version 1 keeps lock files in
/// package folders).
///
/// For the layout-version-2+ structure, the `packages[""]` mirror entry is
/// updated as well. All failures, including absence, resolve to `None`.
pub async fn update_classic_lockfile_version(manifest: &Manifest) -> Option<PathBuf> {
    let path = manifest.location().join(NPM_LOCKFILE_NAME);
    let content = tokio::fs::read_to_string(&path).await.ok()?;
    let mut json: Value = serde_json::from_str(&content).ok()?;
    let version = manifest.version().to_string();

    json.as_object_mut()?
        .insert("version".to_string(), Value::String(version.clone()));

    if let Some(root_entry) = json
        .get_mut("packages")
        .and_then(|packages| packages.get_mut(""))
        .and_then(Value::as_object_mut)
    {
        root_entry.insert("version".to_string(), Value::String(version));
    }

    write_json_file(&path, &json).await.ok()?;
    Some(path)
}

/// Propagate a package's new version into the workspace-root lock file,
/// dispatching on the family discriminant
pub fn update_workspace_lockfile(lockfile: &mut LockfileInfo, manifest: &Manifest) {
    let version = manifest.version().to_string();
    match lockfile.manager {
        PackageManager::Pnpm => update_pnpm_lockfile(lockfile, manifest.name(), &version),
        PackageManager::Npm => update_npm_lockfile(lockfile, manifest.name(), &version),
    }
}

/// Persist a lock file: stable 2-space-indented JSON for the classic family,
/// native YAML for the workspace-aware family. Write failures are swallowed.
pub async fn save_lockfile(lockfile: &LockfileInfo) -> Option<PathBuf> {
    let written = match lockfile.manager {
        PackageManager::Npm => write_json_file(&lockfile.path, &lockfile.json).await.is_ok(),
        PackageManager::Pnpm => match serde_yaml::to_string(&lockfile.json) {
            Ok(content) => tokio::fs::write(&lockfile.path, content).await.is_ok(),
            Err(_) => false,
        },
    };

    if !written {
        warn!(path = %lockfile.path.display(), "failed to persist lock file");
        return None;
    }

    Some(lockfile.path.clone())
}

/// Rewrite every reference to `pkg_name` inside a classic workspace-root
/// lock document (layout version 2+), in place.
///
/// Specifier strings keyed by the package name keep their `^`/`~` prefix;
/// entries mirroring the package itself (`name` plus `version` fields) get
/// their version replaced.
pub fn update_npm_lockfile(lockfile: &mut LockfileInfo, pkg_name: &str, new_version: &str) {
    if !lockfile.is_npm() || pkg_name.is_empty() || new_version.is_empty() {
        return;
    }

    if let Some(root) = lockfile.json.as_object_mut() {
        update_npm_lock_part(root, pkg_name, new_version);
    }
}

fn update_npm_lock_part(part: &mut Map<String, Value>, pkg_name: &str, new_version: &str) {
    // e.g. "packages/pkg-a": { "name": "pkg-a", "version": "1.2.3" }
    if part.get("name").and_then(Value::as_str) == Some(pkg_name) && part.contains_key("version")
    {
        part.insert(
            "version".to_string(),
            Value::String(new_version.to_string()),
        );
    }

    for (key, value) in part.iter_mut() {
        match value {
            Value::Object(inner) => update_npm_lock_part(inner, pkg_name, new_version),
            // e.g. "pkg-a": "^1.2.2" keeps its range prefix
            Value::String(spec) if key == pkg_name => {
                let prefix = range_prefix(spec);
                *spec = format!("{prefix}{new_version}");
            }
            _ => {}
        }
    }
}

fn range_prefix(spec: &str) -> &'static str {
    match spec.as_bytes().first() {
        Some(b'^') => "^",
        Some(b'~') => "~",
        _ => "",
    }
}

/// Rewrite workspace-protocol specifiers for `pkg_name` inside a
/// workspace-aware lock document, in place.
///
/// Only `specifiers` entries carrying a previous version are bumped; bare
/// wildcard or prefix-only markers have nothing meaningful to rewrite.
/// Resolved payloads under `dependencies` are never touched by this path.
pub fn update_pnpm_lockfile(lockfile: &mut LockfileInfo, pkg_name: &str, new_version: &str) {
    if !lockfile.is_pnpm() || pkg_name.is_empty() || new_version.is_empty() {
        return;
    }

    if let Some(importers) = lockfile
        .json
        .get_mut("importers")
        .and_then(Value::as_object_mut)
    {
        update_pnpm_lock_part(importers, pkg_name, new_version);
    }
}

fn update_pnpm_lock_part(part: &mut Map<String, Value>, pkg_name: &str, new_version: &str) {
    for (key, value) in part.iter_mut() {
        if key == "specifiers" {
            if let Some(Value::String(spec)) =
                value.as_object_mut().and_then(|specs| specs.get_mut(pkg_name))
            {
                if let Some(bumped) = bump_workspace_specifier(spec, new_version) {
                    *spec = bumped;
                }
            }
        } else if let Value::Object(inner) = value {
            // never recurse into resolved-version payloads
            if key != "dependencies" {
                update_pnpm_lock_part(inner, pkg_name, new_version);
            }
        }
    }
}

/// `workspace:^1.2.3` → `workspace:^<new>`; bare `workspace:*` /
/// `workspace:^` / `workspace:~` markers carry no previous version and are
/// left untouched
fn bump_workspace_specifier(spec: &str, new_version: &str) -> Option<String> {
    let rest = spec.strip_prefix("workspace:")?;
    let (prefix, previous) = match rest.as_bytes().first() {
        Some(b'^') => ("^", &rest[1..]),
        Some(b'~') => ("~", &rest[1..]),
        Some(b'*') => ("*", &rest[1..]),
        _ => ("", rest),
    };

    if prefix == "*" || previous.is_empty() {
        return None;
    }

    Some(format!("workspace:{prefix}{new_version}"))
}
