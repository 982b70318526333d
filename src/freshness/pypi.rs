use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    info: ProjectInfo,
}

#[derive(Debug, Deserialize)]
struct ProjectInfo {
    version: String,
}

/// Client for the package index JSON API.
pub struct IndexClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl IndexClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Latest released version of a package, per the index.
    pub fn latest_version(&self, package: &str) -> Result<String> {
        let url = format!("{}/pypi/{}/json", self.base_url, package);
        let response: ProjectResponse = self
            .http
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.info.version)
    }
}
