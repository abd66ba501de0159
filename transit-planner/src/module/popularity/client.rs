//! Popularity service client
//!
//! Looks up the planet page of one star/planet pair.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::designation::Designation;
use crate::config::PopularityServiceConfig;
use crate::module::transit::client::USER_AGENT;

/// Anything that can hand out the raw planet page for a designation
#[async_trait]
pub trait PlanetPageSource {
    async fn fetch_planet_page(&self, designation: &Designation) -> Result<String>;
}

pub struct PopularityClient {
    client: Client,
    config: PopularityServiceConfig,
}

impl PopularityClient {
    pub fn new(config: PopularityServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    pub fn planet_url(&self, designation: &Designation) -> String {
        format!(
            "{}?STARNAME={}&PLANET={}",
            self.config.base_url,
            urlencoding::encode(&designation.star),
            urlencoding::encode(&designation.planet.to_string())
        )
    }
}

#[async_trait]
impl PlanetPageSource for PopularityClient {
    async fn fetch_planet_page(&self, designation: &Designation) -> Result<String> {
        let url = self.planet_url(designation);
        tracing::debug!("Fetching planet page {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET planet page of {}", designation.star))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Failed to fetch planet page: HTTP {}",
                response.status()
            ));
        }

        response
            .text()
            .await
            .context("Failed to read planet page body")
    }
}
