mod pypi;
mod requirements;

pub use pypi::IndexClient;
pub use requirements::{load_requirements, parse_requirements, PinnedPackage};

use std::collections::HashMap;

/// A package whose pinned version no longer matches the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outdated {
    pub name: String,
    pub pinned: String,
    pub latest: String,
}

/// Fetch the latest version of each pinned package, sequentially.
/// Individual fetch failures are logged and skipped, not fatal.
pub fn fetch_latest(client: &IndexClient, pins: &[PinnedPackage]) -> HashMap<String, String> {
    let mut latest = HashMap::new();
    for pin in pins {
        match client.latest_version(&pin.name) {
            Ok(version) => {
                log::debug!("{}: latest {version}", pin.name);
                latest.insert(pin.name.clone(), version);
            }
            Err(e) => log::warn!("could not fetch {}: {e}", pin.name),
        }
    }
    latest
}

/// Compare pins against fetched versions; report only actual drift.
pub fn diff_versions(
    pins: &[PinnedPackage],
    latest: &HashMap<String, String>,
) -> Vec<Outdated> {
    pins.iter()
        .filter_map(|pin| {
            let latest_version = latest.get(&pin.name)?;
            (latest_version != &pin.version).then(|| Outdated {
                name: pin.name.clone(),
                pinned: pin.version.clone(),
                latest: latest_version.clone(),
            })
        })
        .collect()
}
