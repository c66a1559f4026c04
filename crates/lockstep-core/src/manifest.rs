//! In-memory model of one package manifest
//!
//! A [`Manifest`] wraps a single `package.json` document. Known fields get
//! typed accessors; everything else passes through the raw document
//! untouched. The raw document lives in a private field so a serialized dump
//! never leaks internal bookkeeping — [`Manifest::to_json`] is the only way
//! out.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ManifestError, Result};
use crate::specifier::{validate_package_name, ResolvedSpecifier, SpecifierKind, UpdatedBy};

/// File name of a package manifest
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Dependency collections in lookup priority order: runtime first, then
/// optional, then development.
const DEP_COLLECTIONS: [&str; 3] = ["dependencies", "optionalDependencies", "devDependencies"];

/// Strip the scope from a package name for use as a bin key
/// (`@scope/pkg` → `pkg`)
fn bin_safe_name(name: &str) -> &str {
    name.strip_prefix('@')
        .and_then(|rest| rest.split_once('/'))
        .map_or(name, |(_, unscoped)| unscoped)
}

/// Mutable representation of one package's manifest
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Fixed at construction; a later [`Manifest::refresh`] never reassigns it
    name: String,
    location: PathBuf,
    root_path: PathBuf,
    /// Owned copy of the manifest's script mapping, not a live alias
    scripts: Map<String, Value>,
    /// Explicit publish-contents override, set via [`Manifest::set_contents`]
    contents: Option<PathBuf>,
    /// The raw document; ordered key/value storage for every field
    doc: Map<String, Value>,
}

impl Manifest {
    /// Create a manifest from a raw document and its directory
    pub fn new(doc: Map<String, Value>, location: impl Into<PathBuf>) -> Result<Self> {
        let location = location.into();
        let root_path = location.clone();
        Self::with_root_path(doc, location, root_path)
    }

    /// Create a manifest rooted at a workspace directory other than its own
    pub fn with_root_path(
        doc: Map<String, Value>,
        location: impl Into<PathBuf>,
        root_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let name = doc.get("name").and_then(Value::as_str).unwrap_or_default();
        let name = validate_package_name(name)?;
        let scripts = doc
            .get("scripts")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            name,
            location: location.into(),
            root_path: root_path.into(),
            scripts,
            contents: None,
            doc,
        })
    }

    /// Load a manifest from a package directory or a direct path to its
    /// manifest file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let location = if path.file_name().is_some_and(|f| f == MANIFEST_FILE_NAME) {
            path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };

        let manifest_path = location.join(MANIFEST_FILE_NAME);
        let content = std::fs::read_to_string(&manifest_path)
            .map_err(|_| ManifestError::NotFound(manifest_path.clone()))?;
        let doc: Map<String, Value> = serde_json::from_str(&content)
            .map_err(|e| ManifestError::ParseFailed(e.to_string()))?;

        Self::new(doc, location)
    }

    /// Package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package version, empty when the manifest declares none
    pub fn version(&self) -> &str {
        self.doc
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Set the package version
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.doc
            .insert("version".to_string(), Value::String(version.into()));
    }

    /// Absolute directory of the package
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Absolute workspace-root directory
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Path to the manifest file itself
    pub fn manifest_location(&self) -> PathBuf {
        self.location.join(MANIFEST_FILE_NAME)
    }

    /// Path to the package's installed executables
    pub fn bin_location(&self) -> PathBuf {
        self.location.join("node_modules").join(".bin")
    }

    /// Path to the package's installed dependencies
    pub fn node_modules_location(&self) -> PathBuf {
        self.location.join("node_modules")
    }

    /// Whether the package is marked private; defaults to false
    pub fn is_private(&self) -> bool {
        self.doc
            .get("private")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Workspace-glob declaration, either a list or a structured form
    pub fn workspaces(&self) -> Option<&Value> {
        self.doc.get("workspaces")
    }

    /// Replace the workspace-glob declaration
    pub fn set_workspaces(&mut self, workspaces: Value) {
        self.doc.insert("workspaces".to_string(), workspaces);
    }

    /// Owned copy of the script mapping taken at construction
    pub fn scripts(&self) -> &Map<String, Value> {
        &self.scripts
    }

    /// Executable mapping, normalizing the single-string form into a map
    /// keyed by the scope-stripped package name
    pub fn bin(&self) -> Map<String, Value> {
        match self.doc.get("bin") {
            Some(Value::String(path)) => {
                let mut bins = Map::new();
                bins.insert(
                    bin_safe_name(&self.name).to_string(),
                    Value::String(path.clone()),
                );
                bins
            }
            Some(Value::Object(bins)) => bins.clone(),
            _ => Map::new(),
        }
    }

    /// Directory whose contents get published: the explicit override if one
    /// was set, otherwise `publishConfig.directory`, otherwise the package
    /// root
    pub fn contents(&self) -> PathBuf {
        if let Some(contents) = &self.contents {
            return contents.clone();
        }

        if let Some(directory) = self
            .doc
            .get("publishConfig")
            .and_then(Value::as_object)
            .and_then(|config| config.get("directory"))
            .and_then(Value::as_str)
        {
            return self.location.join(directory);
        }

        self.location.clone()
    }

    /// Override the publish-contents directory with a subdirectory of the
    /// package
    pub fn set_contents(&mut self, subdirectory: impl AsRef<Path>) {
        self.contents = Some(self.location.join(subdirectory));
    }

    /// Runtime dependency collection
    pub fn dependencies(&self) -> Option<&Map<String, Value>> {
        self.doc.get("dependencies").and_then(Value::as_object)
    }

    /// Development dependency collection
    pub fn dev_dependencies(&self) -> Option<&Map<String, Value>> {
        self.doc.get("devDependencies").and_then(Value::as_object)
    }

    /// Optional dependency collection
    pub fn optional_dependencies(&self) -> Option<&Map<String, Value>> {
        self.doc
            .get("optionalDependencies")
            .and_then(Value::as_object)
    }

    /// Peer dependency collection
    pub fn peer_dependencies(&self) -> Option<&Map<String, Value>> {
        self.doc.get("peerDependencies").and_then(Value::as_object)
    }

    /// Map-like retrieval of arbitrary manifest fields
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// Map-like storage of arbitrary manifest fields; chainable
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.doc.insert(key.into(), value);
        self
    }

    /// Independent copy of the document for munging elsewhere; mutating the
    /// returned value never affects the live manifest
    pub fn to_json(&self) -> Map<String, Value> {
        self.doc.clone()
    }

    /// Reload the full document from disk (e.g. changed by external
    /// lifecycles). The constructed `name` is not affected.
    pub async fn refresh(&mut self) -> Result<&mut Self> {
        let path = self.manifest_location();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| ManifestError::NotFound(path))?;
        self.doc = serde_json::from_str(&content)
            .map_err(|e| ManifestError::ParseFailed(e.to_string()))?;

        Ok(self)
    }

    /// Write the current document to disk
    pub async fn serialize(&self) -> Result<&Self> {
        let mut content = serde_json::to_string_pretty(&self.doc)
            .map_err(|e| ManifestError::WriteFailed(e.to_string()))?;
        content.push('\n');

        tokio::fs::write(self.manifest_location(), content)
            .await
            .map_err(|e| ManifestError::WriteFailed(e.to_string()))?;

        Ok(self)
    }

    /// Rewrite one local dependency edge according to its resolved protocol.
    ///
    /// The owning collection is located by checking runtime, optional, then
    /// development dependencies; if no collection contains the name and no
    /// protocol branch matches, the document is left untouched.
    pub fn update_local_dependency(
        &mut self,
        resolved: &mut ResolvedSpecifier,
        new_version: &str,
        save_prefix: &str,
        strict_workspace_match: bool,
        updated_by: Option<UpdatedBy>,
    ) {
        let dep_name = resolved.name().to_string();

        let collection = DEP_COLLECTIONS.iter().copied().find(|collection| {
            self.doc
                .get(*collection)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(&dep_name))
        });

        if let Some(collection) = collection
            .filter(|_| resolved.is_registry() || resolved.kind == SpecifierKind::Directory)
        {
            // a version (1.2.3), a range (^1.2.3), or a directory (file:../pkg)
            let mut value = format!("{save_prefix}{new_version}");

            if resolved.explicit_workspace {
                let target = resolved.workspace_target.as_deref().unwrap_or_default();

                if updated_by == Some(UpdatedBy::Publish) {
                    // publishing translates the workspace protocol into a
                    // concrete semver range; other targets keep the plain
                    // save-prefixed value
                    if strict_workspace_match {
                        match target {
                            "workspace:*" => value = new_version.to_string(),
                            "workspace:~" => value = format!("~{new_version}"),
                            "workspace:^" => value = format!("^{new_version}"),
                            _ => {}
                        }
                    }
                } else {
                    // bumping keeps symbolic targets verbatim; embedded
                    // ranges like `workspace:^1.2.3` get the fresh value
                    // re-prefixed with the protocol marker
                    value = match target {
                        "workspace:*" | "workspace:^" | "workspace:~" => target.to_string(),
                        _ => format!("workspace:{value}"),
                    };
                }
            }

            self.write_dependency(collection, &dep_name, value);
        } else if let Some(committish) = resolved.git_committish.clone() {
            // a git url with matching committish (#v1.2.3 or #1.2.3); the
            // non-digit leading prefix of the old committish carries over
            let tag_prefix: String = committish
                .chars()
                .take_while(|c| !c.is_ascii_digit())
                .collect();

            if let Some(hosted) = resolved.hosted.as_mut() {
                hosted.committish = Some(format!("{tag_prefix}{new_version}"));
                let spec = hosted.to_spec_string();
                if let Some(collection) = collection {
                    self.write_dependency(collection, &dep_name, spec);
                }
            }
        } else if resolved.git_range.is_some() {
            // a git url with matching range (#semver:^1.2.3)
            if let Some(hosted) = resolved.hosted.as_mut() {
                hosted.committish = Some(format!("semver:{save_prefix}{new_version}"));
                let spec = hosted.to_spec_string();
                if let Some(collection) = collection {
                    self.write_dependency(collection, &dep_name, spec);
                }
            }
        }
    }

    fn write_dependency(&mut self, collection: &str, dep_name: &str, value: String) {
        debug!(
            package = %self.name,
            collection,
            dependency = dep_name,
            %value,
            "rewriting local dependency"
        );
        if let Some(deps) = self.doc.get_mut(collection).and_then(Value::as_object_mut) {
            deps.insert(dep_name.to_string(), Value::String(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specifier::HostedGit;
    use serde_json::json;
    use tempfile::TempDir;

    fn raw(json: Value) -> Map<String, Value> {
        json.as_object().cloned().unwrap()
    }

    fn manifest_with_deps() -> Manifest {
        Manifest::new(
            raw(json!({
                "name": "my-app",
                "version": "1.0.0",
                "dependencies": {
                    "pkg-a": "^1.0.0"
                },
                "optionalDependencies": {
                    "pkg-b": "^1.0.0"
                },
                "devDependencies": {
                    "pkg-c": "^1.0.0"
                }
            })),
            "/workspace/packages/my-app",
        )
        .unwrap()
    }

    fn dep(manifest: &Manifest, collection: &str, name: &str) -> String {
        manifest
            .get(collection)
            .and_then(|deps| deps.get(name))
            .and_then(Value::as_str)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_basic_accessors() {
        let manifest = Manifest::new(
            raw(json!({"name": "test", "version": "1.2.3"})),
            "/workspace/packages/test",
        )
        .unwrap();

        assert_eq!(manifest.name(), "test");
        assert_eq!(manifest.version(), "1.2.3");
        assert!(!manifest.is_private());
        assert_eq!(
            manifest.manifest_location(),
            PathBuf::from("/workspace/packages/test/package.json")
        );
        assert_eq!(
            manifest.node_modules_location(),
            PathBuf::from("/workspace/packages/test/node_modules")
        );
    }

    #[test]
    fn test_invalid_name_is_fatal() {
        let result = Manifest::new(raw(json!({"version": "1.0.0"})), "/workspace/pkg");
        assert!(result.is_err());
    }

    #[test]
    fn test_bin_normalizes_string_form() {
        let manifest = Manifest::new(
            raw(json!({"name": "@scope/cli", "version": "1.0.0", "bin": "./cli.js"})),
            "/workspace/packages/cli",
        )
        .unwrap();

        let bins = manifest.bin();
        assert_eq!(bins.get("cli").and_then(Value::as_str), Some("./cli.js"));
    }

    #[test]
    fn test_bin_object_form_passes_through() {
        let manifest = Manifest::new(
            raw(json!({"name": "tool", "version": "1.0.0", "bin": {"a": "./a.js", "b": "./b.js"}})),
            "/workspace/packages/tool",
        )
        .unwrap();

        assert_eq!(manifest.bin().len(), 2);
    }

    #[test]
    fn test_contents_override_order() {
        let mut manifest = Manifest::new(
            raw(json!({
                "name": "test",
                "version": "1.0.0",
                "publishConfig": {"directory": "dist"}
            })),
            "/workspace/packages/test",
        )
        .unwrap();

        assert_eq!(
            manifest.contents(),
            PathBuf::from("/workspace/packages/test/dist")
        );

        manifest.set_contents("build");
        assert_eq!(
            manifest.contents(),
            PathBuf::from("/workspace/packages/test/build")
        );
    }

    #[test]
    fn test_get_set_chainable() {
        let mut manifest = Manifest::new(
            raw(json!({"name": "test", "version": "1.0.0"})),
            "/workspace/packages/test",
        )
        .unwrap();

        manifest
            .set("description", json!("a package"))
            .set("keywords", json!(["one", "two"]));

        assert_eq!(
            manifest.get("description").and_then(Value::as_str),
            Some("a package")
        );
        assert_eq!(manifest.get("missing"), None);
    }

    #[test]
    fn test_to_json_is_independent() {
        let manifest = manifest_with_deps();

        let mut copy = manifest.to_json();
        copy.insert("version".to_string(), json!("9.9.9"));
        copy.get_mut("dependencies")
            .and_then(Value::as_object_mut)
            .unwrap()
            .insert("pkg-a".to_string(), json!("mutated"));

        assert_eq!(manifest.version(), "1.0.0");
        assert_eq!(dep(&manifest, "dependencies", "pkg-a"), "^1.0.0");
    }

    #[test]
    fn test_scripts_are_an_owned_copy() {
        let mut manifest = Manifest::new(
            raw(json!({"name": "test", "version": "1.0.0", "scripts": {"build": "tsc"}})),
            "/workspace/packages/test",
        )
        .unwrap();

        manifest.set("scripts", json!({"build": "changed"}));
        assert_eq!(
            manifest.scripts().get("build").and_then(Value::as_str),
            Some("tsc")
        );
    }

    #[tokio::test]
    async fn test_refresh_keeps_constructed_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        std::fs::write(&path, r#"{"name": "original", "version": "1.0.0"}"#).unwrap();

        let mut manifest = Manifest::from_path(temp.path()).unwrap();
        std::fs::write(&path, r#"{"name": "renamed", "version": "2.0.0"}"#).unwrap();

        manifest.refresh().await.unwrap();
        assert_eq!(manifest.name(), "original");
        assert_eq!(manifest.version(), "2.0.0");
    }

    #[tokio::test]
    async fn test_refresh_fails_when_file_missing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name": "test", "version": "1.0.0"}"#,
        )
        .unwrap();

        let mut manifest = Manifest::from_path(temp.path()).unwrap();
        std::fs::remove_file(temp.path().join("package.json")).unwrap();

        assert!(manifest.refresh().await.is_err());
    }

    #[tokio::test]
    async fn test_serialize_round_trip() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name": "test", "version": "1.0.0", "customField": "kept"}"#,
        )
        .unwrap();

        let mut manifest = Manifest::from_path(temp.path()).unwrap();
        manifest.set_version("2.0.0");
        manifest.serialize().await.unwrap();

        let content = std::fs::read_to_string(temp.path().join("package.json")).unwrap();
        assert!(content.ends_with('\n'));
        assert!(content.contains("customField"));

        let reloaded = Manifest::from_path(temp.path()).unwrap();
        assert_eq!(reloaded.version(), "2.0.0");
    }

    #[test]
    fn test_update_registry_dependency() {
        let mut manifest = manifest_with_deps();
        let mut resolved = ResolvedSpecifier::registry("pkg-a").unwrap();

        manifest.update_local_dependency(&mut resolved, "2.0.0", "^", true, None);
        assert_eq!(dep(&manifest, "dependencies", "pkg-a"), "^2.0.0");
    }

    #[test]
    fn test_update_respects_collection_priority() {
        let mut manifest = manifest_with_deps();

        let mut optional = ResolvedSpecifier::registry("pkg-b").unwrap();
        manifest.update_local_dependency(&mut optional, "3.0.0", "~", true, None);
        assert_eq!(dep(&manifest, "optionalDependencies", "pkg-b"), "~3.0.0");

        let mut dev = ResolvedSpecifier::registry("pkg-c").unwrap();
        manifest.update_local_dependency(&mut dev, "3.0.0", "", true, None);
        assert_eq!(dep(&manifest, "devDependencies", "pkg-c"), "3.0.0");

        // the other collections are untouched
        assert_eq!(dep(&manifest, "dependencies", "pkg-a"), "^1.0.0");
    }

    #[test]
    fn test_update_directory_dependency() {
        let mut manifest = Manifest::new(
            raw(json!({
                "name": "my-app",
                "version": "1.0.0",
                "dependencies": {"pkg-a": "file:../pkg-a"}
            })),
            "/workspace/packages/my-app",
        )
        .unwrap();

        let mut resolved = ResolvedSpecifier::directory("pkg-a").unwrap();
        manifest.update_local_dependency(&mut resolved, "2.0.0", "^", true, None);
        assert_eq!(dep(&manifest, "dependencies", "pkg-a"), "^2.0.0");
    }

    #[test]
    fn test_update_is_noop_for_unknown_dependency() {
        let mut manifest = manifest_with_deps();
        let before = manifest.to_json();

        let mut resolved = ResolvedSpecifier::registry("not-local").unwrap();
        manifest.update_local_dependency(&mut resolved, "2.0.0", "^", true, None);

        assert_eq!(manifest.to_json(), before);
    }

    #[test]
    fn test_update_is_noop_for_unresolved_specifier() {
        let mut manifest = manifest_with_deps();
        let before = manifest.to_json();

        let mut resolved = ResolvedSpecifier::unresolved("pkg-a").unwrap();
        manifest.update_local_dependency(&mut resolved, "2.0.0", "^", true, None);

        assert_eq!(manifest.to_json(), before);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut manifest = manifest_with_deps();
        let mut resolved = ResolvedSpecifier::workspace("pkg-a", "workspace:^1.0.0").unwrap();

        manifest.update_local_dependency(
            &mut resolved,
            "1.3.3",
            "^",
            true,
            Some(UpdatedBy::Version),
        );
        let once = dep(&manifest, "dependencies", "pkg-a");

        manifest.update_local_dependency(
            &mut resolved,
            "1.3.3",
            "^",
            true,
            Some(UpdatedBy::Version),
        );
        assert_eq!(dep(&manifest, "dependencies", "pkg-a"), once);
        assert_eq!(once, "workspace:^1.3.3");
    }

    #[test]
    fn test_publish_strict_match_translates_symbolic_targets() {
        for (target, expected) in [
            ("workspace:*", "2.0.0"),
            ("workspace:^", "^2.0.0"),
            ("workspace:~", "~2.0.0"),
        ] {
            let mut manifest = manifest_with_deps();
            let mut resolved = ResolvedSpecifier::workspace("pkg-a", target).unwrap();

            manifest.update_local_dependency(
                &mut resolved,
                "2.0.0",
                "^",
                true,
                Some(UpdatedBy::Publish),
            );
            assert_eq!(dep(&manifest, "dependencies", "pkg-a"), expected);
        }
    }

    #[test]
    fn test_publish_strict_match_embedded_range_falls_through() {
        let mut manifest = manifest_with_deps();
        let mut resolved = ResolvedSpecifier::workspace("pkg-a", "workspace:^1.0.0").unwrap();

        manifest.update_local_dependency(
            &mut resolved,
            "2.0.0",
            "~",
            true,
            Some(UpdatedBy::Publish),
        );
        assert_eq!(dep(&manifest, "dependencies", "pkg-a"), "~2.0.0");
    }

    #[test]
    fn test_publish_without_strict_match_uses_save_prefix() {
        for target in ["workspace:*", "workspace:^", "workspace:~", "workspace:^1.0.0"] {
            let mut manifest = manifest_with_deps();
            let mut resolved = ResolvedSpecifier::workspace("pkg-a", target).unwrap();

            manifest.update_local_dependency(
                &mut resolved,
                "1.0.1",
                "^",
                false,
                Some(UpdatedBy::Publish),
            );
            assert_eq!(dep(&manifest, "dependencies", "pkg-a"), "^1.0.1");
        }
    }

    #[test]
    fn test_version_bump_preserves_symbolic_targets() {
        for target in ["workspace:*", "workspace:^", "workspace:~"] {
            let mut manifest = manifest_with_deps();
            let mut resolved = ResolvedSpecifier::workspace("pkg-a", target).unwrap();

            manifest.update_local_dependency(
                &mut resolved,
                "2.0.0",
                "^",
                true,
                Some(UpdatedBy::Version),
            );
            assert_eq!(dep(&manifest, "dependencies", "pkg-a"), target);
        }
    }

    #[test]
    fn test_version_bump_rewrites_embedded_workspace_range() {
        let mut manifest = manifest_with_deps();
        let mut resolved = ResolvedSpecifier::workspace("pkg-a", "workspace:^1.0.0").unwrap();

        manifest.update_local_dependency(
            &mut resolved,
            "1.3.3",
            "^",
            true,
            Some(UpdatedBy::Version),
        );
        assert_eq!(dep(&manifest, "dependencies", "pkg-a"), "workspace:^1.3.3");
    }

    #[test]
    fn test_update_git_committish_keeps_tag_prefix() {
        let mut manifest = Manifest::new(
            raw(json!({
                "name": "my-app",
                "version": "1.0.0",
                "dependencies": {"pkg-a": "git+https://github.com/user/pkg-a.git#v1.2.3"}
            })),
            "/workspace/packages/my-app",
        )
        .unwrap();

        let hosted =
            HostedGit::with_committish("git+https://github.com/user/pkg-a.git", "v1.2.3");
        let mut resolved = ResolvedSpecifier::git_committish("pkg-a", hosted, "v1.2.3").unwrap();

        manifest.update_local_dependency(&mut resolved, "2.0.0", "^", true, None);
        assert_eq!(
            dep(&manifest, "dependencies", "pkg-a"),
            "git+https://github.com/user/pkg-a.git#v2.0.0"
        );
        assert_eq!(
            resolved.hosted.unwrap().committish.as_deref(),
            Some("v2.0.0")
        );
    }

    #[test]
    fn test_update_git_committish_without_tag_prefix() {
        let mut manifest = Manifest::new(
            raw(json!({
                "name": "my-app",
                "version": "1.0.0",
                "dependencies": {"pkg-a": "git+https://github.com/user/pkg-a.git#1.2.3"}
            })),
            "/workspace/packages/my-app",
        )
        .unwrap();

        let hosted = HostedGit::with_committish("git+https://github.com/user/pkg-a.git", "1.2.3");
        let mut resolved = ResolvedSpecifier::git_committish("pkg-a", hosted, "1.2.3").unwrap();

        manifest.update_local_dependency(&mut resolved, "2.0.0", "^", true, None);
        assert_eq!(
            dep(&manifest, "dependencies", "pkg-a"),
            "git+https://github.com/user/pkg-a.git#2.0.0"
        );
    }

    #[test]
    fn test_update_git_range() {
        let mut manifest = Manifest::new(
            raw(json!({
                "name": "my-app",
                "version": "1.0.0",
                "dependencies": {"pkg-a": "git+https://github.com/user/pkg-a.git#semver:^1.2.3"}
            })),
            "/workspace/packages/my-app",
        )
        .unwrap();

        let hosted = HostedGit::new("git+https://github.com/user/pkg-a.git");
        let mut resolved = ResolvedSpecifier::git_range("pkg-a", hosted, "semver:^1.2.3").unwrap();

        manifest.update_local_dependency(&mut resolved, "2.0.0", "^", true, None);
        assert_eq!(
            dep(&manifest, "dependencies", "pkg-a"),
            "git+https://github.com/user/pkg-a.git#semver:^2.0.0"
        );
    }
}
