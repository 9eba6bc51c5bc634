use tracing::debug;

use crate::inventory::PackageRegistry;
use crate::license::LicenseResolver;
use crate::models::{PackageRecord, UNKNOWN};
use crate::registry::LicenseLookup;

/// Records built from one pass over the registry.
#[derive(Debug, Default)]
pub struct Inventory {
    pub records: Vec<PackageRecord>,
    /// Listed packages whose metadata could not be read back.
    pub skipped: usize,
}

/// Enumerate installed packages and resolve each license, one package at a time.
///
/// Packages that disappear between listing and lookup are left out.
pub fn collect_records<R, L>(registry: &R, resolver: &LicenseResolver<L>) -> Inventory
where
    R: PackageRegistry,
    L: LicenseLookup,
{
    let mut inventory = Inventory::default();

    for listed in registry.list_installed() {
        let Some(info) = registry.get_metadata(&listed.name) else {
            debug!("Metadata for {} is no longer available, skipping", listed.name);
            inventory.skipped += 1;
            continue;
        };

        let license = resolver
            .resolve(info.declared_license(), info.declared_home_page())
            .into_license();

        inventory.records.push(PackageRecord {
            name: listed.name,
            version: info.version.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            license,
            project_url: info.declared_home_page().to_string(),
        });
    }

    debug!(
        "Collected {} packages ({} skipped)",
        inventory.records.len(),
        inventory.skipped
    );
    inventory
}
