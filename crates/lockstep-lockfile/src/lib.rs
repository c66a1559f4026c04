//! Lockstep Lockfile - dependency lock-file synchronization
//!
//! Loads, mutates, and persists workspace lock files so that their embedded
//! version numbers track manifest changes. Two structural families are
//! supported: the classic single-tree family (`package-lock.json`) and the
//! workspace-aware importer family (`pnpm-lock.yaml`).

pub mod sync;
pub mod types;

pub use sync::{
    load_lockfile, save_lockfile, update_classic_lockfile_version, update_npm_lockfile,
    update_pnpm_lockfile, update_workspace_lockfile, NPM_LOCKFILE_NAME, PNPM_LOCKFILE_NAME,
};
pub use types::{LockfileInfo, PackageManager};
