//! Local inventory of installed Python distributions.
//!
//! - [`metadata`] — parser for the core-metadata header block (`METADATA` / `PKG-INFO`).
//! - [`python`] — [`PackageRegistry`] backed by site-packages directories, plus
//!   search-root discovery through a Python interpreter.

use crate::models::RawPackageInfo;

pub mod metadata;
pub mod python;

/// Read-only view of the packages installed in an environment.
pub trait PackageRegistry {
    /// Every installed distribution, in stable enumeration order.
    fn list_installed(&self) -> Vec<RawPackageInfo>;

    /// Metadata for one distribution by name, or `None` when it cannot be found.
    fn get_metadata(&self, name: &str) -> Option<RawPackageInfo>;
}
