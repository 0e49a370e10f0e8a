use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use crate::insights::InsightRecord;
use crate::settings::SettingsStore;

use super::InsightSource;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Client for the hosted insights API. Insights are computed server-side
/// from the user's transaction history; this client only fetches them.
pub struct InsightsApiClient {
    http: reqwest::Client,
    settings: Arc<SettingsStore>,
}

impl InsightsApiClient {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl InsightSource for InsightsApiClient {
    async fn fetch_insights(&self) -> Result<Vec<InsightRecord>> {
        let providers = self.settings.providers();

        let mut request = self.http.get(&providers.insights_url);
        if let Some(key) = providers.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.context("insight request failed")?;

        if !response.status().is_success() {
            bail!("insight endpoint returned {}", response.status());
        }

        let insights: Vec<InsightRecord> = response
            .json()
            .await
            .context("failed to decode insight response")?;

        log_info!(
            "fetched {} insights from {}",
            insights.len(),
            providers.insights_url
        );

        Ok(insights)
    }
}
