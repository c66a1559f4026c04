//! Lockstep Core - version synchronization for co-developed packages
//!
//! This crate provides the manifest model, dependency specifier rewriting,
//! and package discovery underlying the Lockstep monorepo tooling. Given a
//! resolved dependency edge and a target version, it computes the rewritten
//! specifier in the exact textual form the original protocol requires.

pub mod discovery;
pub mod error;
pub mod manifest;
pub mod specifier;

pub use discovery::{discover_manifests, FileFinder};
pub use error::{ConfigError, LockstepError, ManifestError, Result};
pub use manifest::{Manifest, MANIFEST_FILE_NAME};
pub use specifier::{HostedGit, ResolvedSpecifier, SpecifierKind, UpdatedBy};
