//! Transit-table service client
//!
//! Fetches the prediction page for the configured date range. The
//! observer's position travels in two cookies, the service ignores query
//! parameters for it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeDelta, Utc};
use reqwest::{Client, header};

use crate::config::TransitServiceConfig;

pub const USER_AGENT: &str = "Mozilla/5.0 transit-planner/0.1";

/// Anything that can hand out the raw transit table page
#[async_trait]
pub trait TransitTableSource {
    async fn fetch_transit_page(&self) -> Result<String>;
}

pub struct TransitTableClient {
    client: Client,
    config: TransitServiceConfig,
}

impl TransitTableClient {
    pub fn new(config: TransitServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    /// Query URL for a run started on `today`.
    pub fn query_url(&self, today: NaiveDate) -> String {
        let init = today - TimeDelta::days(i64::from(self.config.lookback_days));
        let till = today + TimeDelta::days(i64::from(self.config.lookahead_days));
        format!(
            "{}?init={}&till={}&f=userdefined",
            self.config.base_url,
            init.format("%Y-%m-%d"),
            till.format("%Y-%m-%d")
        )
    }

    pub fn location_cookie(&self) -> String {
        format!(
            "cookiedelka={}; cookiesirka={}",
            self.config.longitude, self.config.latitude
        )
    }
}

#[async_trait]
impl TransitTableSource for TransitTableClient {
    async fn fetch_transit_page(&self) -> Result<String> {
        let url = self.query_url(Utc::now().date_naive());
        tracing::info!("Fetching transit table from {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, self.location_cookie())
            .send()
            .await
            .context("Failed to GET transit table")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Failed to fetch transit table: HTTP {}",
                response.status()
            ));
        }

        response
            .text()
            .await
            .context("Failed to read transit table body")
    }
}
