//! Lock-file document types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Package manager family a lock file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// Classic family: a single JSON tree (`package-lock.json`)
    Npm,
    /// Workspace-aware family: an importer-keyed document (`pnpm-lock.yaml`)
    Pnpm,
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Npm => write!(f, "npm"),
            Self::Pnpm => write!(f, "pnpm"),
        }
    }
}

/// A loaded lock file: parsed document, detected layout version, and family
/// discriminant.
///
/// Both families normalize to one ordered document tree; the workspace-aware
/// family is transcoded from YAML on load and back on save.
#[derive(Debug, Clone)]
pub struct LockfileInfo {
    /// Parsed document tree
    pub json: Value,
    /// Declared layout version (`lockfileVersion`), defaulting to 1
    pub version: u32,
    /// Path the document was loaded from
    pub path: PathBuf,
    /// Family discriminant; checked before any structural walk
    pub manager: PackageManager,
}

impl LockfileInfo {
    /// Whether this lock file belongs to the classic family
    pub fn is_npm(&self) -> bool {
        self.manager == PackageManager::Npm
    }

    /// Whether this lock file belongs to the workspace-aware family
    pub fn is_pnpm(&self) -> bool {
        self.manager == PackageManager::Pnpm
    }
}
