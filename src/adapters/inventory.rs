// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory REST API Adapter
//!
//! Fetches the network equipment of a site from the cluster reference API:
//!
//! ```text
//! GET <base_url>/sites/<site>/network_equipments   Accept: application/json
//! ```
//!
//! Any failure here is fatal to the run: without a well-formed document no
//! safe partial topology can be built.
//!
//! # Example
//!
//! ```rust,no_run
//! use switchmap::adapters::{InventoryClient, TopologySource};
//! use switchmap::config::InventoryConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = InventoryClient::new(InventoryConfig::default())?;
//!     let doc = client.fetch_network_equipments("nancy").await?;
//!     println!("{} inventory items", doc.items.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::InventoryConfig;
use crate::domain::TopologyDocument;
use crate::errors::{MapperError, MapperResult};

/// Where topology documents come from
#[async_trait]
pub trait TopologySource: Send + Sync {
    /// Network equipment document of `site_id`
    async fn fetch_network_equipments(&self, site_id: &str) -> MapperResult<TopologyDocument>;

    /// Name of this source, for logs
    fn name(&self) -> &str;
}

/// HTTP client for the inventory API
pub struct InventoryClient {
    config: InventoryConfig,
    client: Client,
}

impl InventoryClient {
    /// Create a client; no request is made until the first fetch
    pub fn new(config: InventoryConfig) -> MapperResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| {
                MapperError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// URL of the network equipment resource of `site_id`
    pub fn network_equipments_url(&self, site_id: &str) -> String {
        format!(
            "{}/sites/{}/network_equipments",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(site_id)
        )
    }
}

#[async_trait]
impl TopologySource for InventoryClient {
    async fn fetch_network_equipments(&self, site_id: &str) -> MapperResult<TopologyDocument> {
        let url = self.network_equipments_url(site_id);
        info!("Fetching network equipments from {}", url);

        let mut request = self.client.get(&url);
        if let Some(user) = &self.config.user {
            request = request.basic_auth(user, self.config.password.as_ref());
        }

        let response = request
            .send()
            .await
            .map_err(|e| MapperError::InventoryUnavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapperError::InventoryStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let doc: TopologyDocument = serde_json::from_str(&body)?;
        debug!("Inventory returned {} items for {}", doc.items.len(), site_id);
        Ok(doc)
    }

    fn name(&self) -> &str {
        "inventory-rest-api"
    }
}
