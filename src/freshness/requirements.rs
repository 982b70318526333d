use crate::error::Result;
use std::path::Path;

/// One `name==version` pin from a requirements file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedPackage {
    pub name: String,
    pub version: String,
}

/// Read and parse a pinned requirements file.
pub fn load_requirements(path: &Path) -> Result<Vec<PinnedPackage>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_requirements(&text))
}

/// Extract pinned packages from requirements text.
///
/// Tolerates pip-compile output: trailing backslash continuations,
/// `--hash` lines, environment markers after `;`, and extras in brackets.
/// Comments, blank lines, and unpinned requirements are skipped.
pub fn parse_requirements(text: &str) -> Vec<PinnedPackage> {
    let mut pins = Vec::new();

    for raw in text.lines() {
        let line = raw.trim().trim_end_matches('\\').trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("--") {
            continue;
        }

        // Strip an environment marker, then split the pin.
        let requirement = line.split(';').next().unwrap_or(line).trim();
        let Some((name, version)) = requirement.split_once("==") else {
            continue;
        };

        let name = name.trim();
        let name = name.split('[').next().unwrap_or(name).trim();
        let version = version.trim();
        if name.is_empty() || version.is_empty() {
            continue;
        }

        pins.push(PinnedPackage {
            name: name.to_string(),
            version: version.to_string(),
        });
    }

    pins
}
