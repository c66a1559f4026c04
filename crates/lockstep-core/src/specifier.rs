//! Resolved dependency specifiers
//!
//! A [`ResolvedSpecifier`] describes one dependency edge after specifier
//! parsing: which protocol the declaration used (registry range, pinned
//! directory, source-control reference) and the pieces a rewrite needs to
//! preserve (committish fragments, workspace-protocol targets).

use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, Result};

/// Which command requested a dependency rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatedBy {
    /// Publishing to a registry; workspace targets are translated to
    /// concrete ranges
    Publish,
    /// Bumping versions in place; symbolic workspace targets are preserved
    Version,
}

/// Protocol family of a resolved specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecifierKind {
    /// Semver version, range, or tag resolved against a registry
    Registry,
    /// Pinned directory reference (`file:../pkg`)
    Directory,
    /// Source-control reference
    Git,
    /// Not resolvable to a known protocol
    Unresolved,
}

/// A hosted source-control reference whose committish can be rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedGit {
    base: String,
    /// The `#fragment` appended to the URL, mutated during a rewrite
    pub committish: Option<String>,
}

impl HostedGit {
    /// Create a hosted reference from its base URL (e.g.
    /// `git+https://github.com/user/repo.git`)
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            committish: None,
        }
    }

    /// Create a hosted reference with an initial committish fragment
    pub fn with_committish(base: impl Into<String>, committish: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            committish: Some(committish.into()),
        }
    }

    /// Base URL without the committish fragment
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full spec string, with the git-plus scheme and committish both
    /// rendered
    pub fn to_spec_string(&self) -> String {
        match &self.committish {
            Some(committish) => format!("{}#{}", self.base, committish),
            None => self.base.clone(),
        }
    }
}

/// One dependency edge, as resolved by specifier parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpecifier {
    /// Dependency name; never reassigned across a rewrite
    name: String,
    /// Protocol family
    pub kind: SpecifierKind,
    /// `#ref` fragment anchored to a tag-like string (e.g. `v1.2.3`)
    pub git_committish: Option<String>,
    /// `#semver:` fragment (e.g. `semver:^1.2.3`)
    pub git_range: Option<String>,
    /// Hosted reference, present for source-control specifiers
    pub hosted: Option<HostedGit>,
    /// Specifier used the `workspace:` linking protocol
    pub explicit_workspace: bool,
    /// Original workspace-protocol literal (e.g. `workspace:*`,
    /// `workspace:^1.2.3`)
    pub workspace_target: Option<String>,
}

impl ResolvedSpecifier {
    fn new(name: &str, kind: SpecifierKind) -> Result<Self> {
        Ok(Self {
            name: validate_package_name(name)?,
            kind,
            git_committish: None,
            git_range: None,
            hosted: None,
            explicit_workspace: false,
            workspace_target: None,
        })
    }

    /// A bare semver version, range, or tag
    pub fn registry(name: &str) -> Result<Self> {
        Self::new(name, SpecifierKind::Registry)
    }

    /// A pinned `file:` directory reference
    pub fn directory(name: &str) -> Result<Self> {
        Self::new(name, SpecifierKind::Directory)
    }

    /// A `workspace:` protocol specifier carrying its original target
    /// literal
    pub fn workspace(name: &str, target: &str) -> Result<Self> {
        let mut resolved = Self::new(name, SpecifierKind::Registry)?;
        resolved.explicit_workspace = true;
        resolved.workspace_target = Some(target.to_string());
        Ok(resolved)
    }

    /// A source-control reference pinned to a committish (`#v1.2.3`)
    pub fn git_committish(name: &str, hosted: HostedGit, committish: &str) -> Result<Self> {
        let mut resolved = Self::new(name, SpecifierKind::Git)?;
        resolved.git_committish = Some(committish.to_string());
        resolved.hosted = Some(hosted);
        Ok(resolved)
    }

    /// A source-control reference carrying a `#semver:` range
    pub fn git_range(name: &str, hosted: HostedGit, range: &str) -> Result<Self> {
        let mut resolved = Self::new(name, SpecifierKind::Git)?;
        resolved.git_range = Some(range.to_string());
        resolved.hosted = Some(hosted);
        Ok(resolved)
    }

    /// A specifier that did not resolve to any known protocol
    pub fn unresolved(name: &str) -> Result<Self> {
        Self::new(name, SpecifierKind::Unresolved)
    }

    /// Dependency name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this specifier resolves against a registry
    pub fn is_registry(&self) -> bool {
        self.kind == SpecifierKind::Registry
    }
}

/// Validate a package identity; an unparsable name is fatal, never
/// silently defaulted.
pub(crate) fn validate_package_name(name: &str) -> std::result::Result<String, ManifestError> {
    if name.trim().is_empty()
        || name.chars().any(char::is_whitespace)
        || name.starts_with('.')
        || name.starts_with('_')
    {
        return Err(ManifestError::InvalidName(name.to_string()));
    }
    Ok(name.to_string())
}
