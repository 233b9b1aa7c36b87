//! SpaceX API client
//!
//! Fetches the raw collections and hands them to `landfall_core` for
//! normalization. The client is built from an explicit [`ApiConfig`]; nothing
//! here reads process-wide state.

use crate::prelude::*;
use landfall_core::records::{parse_cores, parse_landpads, parse_launches, Core, Landpad, Launch};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.spacexdata.com/v4";

/// Upstream endpoint settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_global(global: &crate::Global) -> Self {
        Self {
            base_url: global.api_base.clone(),
            timeout: Duration::from_secs(global.timeout),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpaceXClient {
    http: reqwest::Client,
    base_url: String,
}

/// The three collections every report is built from, fetched together
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub cores: Vec<Core>,
    pub landpads: Vec<Landpad>,
    pub launches: Vec<Launch>,
}

impl SpaceXClient {
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("landfall/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http,
            // Handle base_url that may or may not have trailing slash
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and parse the body as JSON
    pub async fn get_json(&self, path: &str) -> Result<Value, Error> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(|e| Error::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    pub async fn cores(&self) -> Result<Vec<Core>, Error> {
        let cores = parse_cores(self.get_json("/cores").await?)?;
        log::debug!("Loaded {} cores", cores.len());
        Ok(cores)
    }

    pub async fn landpads(&self) -> Result<Vec<Landpad>, Error> {
        let landpads = parse_landpads(self.get_json("/landpads").await?)?;
        log::debug!("Loaded {} landpads", landpads.len());
        Ok(landpads)
    }

    /// Completed launches, oldest first
    pub async fn past_launches(&self) -> Result<Vec<Launch>, Error> {
        let launches = parse_launches(self.past_launches_raw().await?)?;
        log::debug!("Loaded {} past launches", launches.len());
        Ok(launches)
    }

    /// Completed launches exactly as the API returned them
    pub async fn past_launches_raw(&self) -> Result<Value, Error> {
        self.get_json("/launches/past").await
    }

    pub async fn snapshot(&self) -> Result<Snapshot, Error> {
        let (cores, landpads, launches) =
            futures::try_join!(self.cores(), self.landpads(), self.past_launches())?;

        Ok(Snapshot {
            cores,
            landpads,
            launches,
        })
    }
}
