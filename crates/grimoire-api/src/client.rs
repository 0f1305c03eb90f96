//! HTTP client for the game-reference API.
//!
//! Plain REST, GET-only. One request per call — no retries, no backoff, no
//! caching. Error display strings match what the screens show verbatim, so
//! callers can surface `err.to_string()` directly.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::model::{Building, Card, Creep, EntityId, Hero, Item, Race, Unit, Upgrade};

pub const DEFAULT_BASE_URL: &str = "http://wbgl.cz/api/v1";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Any non-2xx response.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// Network failure or undecodable body.
    #[error("{0}")]
    Transport(String),
    #[error("An unknown error occurred.")]
    Unknown,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an opaque icon reference against the assets sub-path.
    pub fn asset_url(&self, icon: &str) -> String {
        format!("{}/assets/{}", self.base_url, icon)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    // ── Collection endpoints ─────────────────────────────────────────────────

    pub async fn races(&self) -> Result<Vec<Race>, ApiError> {
        self.get_json("races").await
    }

    pub async fn heroes(&self, faction: &str) -> Result<Vec<Hero>, ApiError> {
        self.get_json(&format!("heroes/race/{faction}")).await
    }

    pub async fn units(&self, faction: &str) -> Result<Vec<Unit>, ApiError> {
        self.get_json(&format!("units/{faction}")).await
    }

    pub async fn buildings(&self, faction: &str) -> Result<Vec<Building>, ApiError> {
        self.get_json(&format!("buildings/race/{faction}")).await
    }

    pub async fn items(&self, faction: &str) -> Result<Vec<Item>, ApiError> {
        self.get_json(&format!("items/race/{faction}")).await
    }

    pub async fn upgrades(&self, faction: &str) -> Result<Vec<Upgrade>, ApiError> {
        self.get_json(&format!("upgrades/race/{faction}")).await
    }

    pub async fn cards(&self, faction: &str) -> Result<Vec<Card>, ApiError> {
        self.get_json(&format!("cards/race/{faction}")).await
    }

    pub async fn creeps(&self) -> Result<Vec<Creep>, ApiError> {
        self.get_json("creeps").await
    }

    // ── Detail endpoints ─────────────────────────────────────────────────────

    pub async fn race(&self, faction: &str) -> Result<Race, ApiError> {
        self.get_json(&format!("race/{faction}")).await
    }

    pub async fn hero(&self, id: EntityId) -> Result<Hero, ApiError> {
        self.get_json(&format!("hero/{id}")).await
    }

    pub async fn unit(&self, id: EntityId) -> Result<Unit, ApiError> {
        self.get_json(&format!("unit/{id}")).await
    }

    pub async fn building(&self, id: EntityId) -> Result<Building, ApiError> {
        self.get_json(&format!("building/{id}")).await
    }

    pub async fn creep(&self, id: EntityId) -> Result<Creep, ApiError> {
        self.get_json(&format!("creep/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://wbgl.cz/api/v1/");
        assert_eq!(client.base_url(), "http://wbgl.cz/api/v1");
    }

    #[test]
    fn test_asset_url() {
        let client = ApiClient::new(DEFAULT_BASE_URL);
        assert_eq!(
            client.asset_url("orc.png"),
            "http://wbgl.cz/api/v1/assets/orc.png"
        );
    }

    #[test]
    fn test_status_error_display() {
        assert_eq!(
            ApiError::Status(500).to_string(),
            "HTTP error! status: 500"
        );
        assert_eq!(ApiError::Unknown.to_string(), "An unknown error occurred.");
    }
}
