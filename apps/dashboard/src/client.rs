//! HTTP client for the Finboard REST API.

use std::time::Duration;

use chrono::Local;
use finboard_core::analytics::{CategoryBreakdown, MonthlyTrend, SummaryResponse};
use finboard_core::budgets::BudgetStatus;
use finboard_core::transactions::Transaction;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::snapshot::Snapshot;

/// Number of transactions shown in the "recent" table.
pub const RECENT_TRANSACTIONS: u32 = 10;
/// Months shown in the trend chart.
pub const TREND_MONTHS: u32 = 6;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} returned {status}: {message}")]
    Status {
        path: String,
        status: StatusCode,
        message: String,
    },

    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let mut request = self.http.get(self.endpoint(path)).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Status {
                path: path.to_string(),
                status,
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn summary(&self) -> Result<SummaryResponse, ClientError> {
        self.get_json("/analytics/summary", &[]).await
    }

    pub async fn expenses_by_category(&self) -> Result<Vec<CategoryBreakdown>, ClientError> {
        self.get_json("/analytics/by-category", &[("type", "EXPENSE".to_string())])
            .await
    }

    pub async fn monthly_trend(&self, months: u32) -> Result<Vec<MonthlyTrend>, ClientError> {
        self.get_json("/analytics/monthly-trend", &[("months", months.to_string())])
            .await
    }

    pub async fn budgets(&self) -> Result<Vec<BudgetStatus>, ClientError> {
        self.get_json("/budgets/", &[]).await
    }

    pub async fn recent_transactions(&self, limit: u32) -> Result<Vec<Transaction>, ClientError> {
        self.get_json("/transactions/", &[("limit", limit.to_string())])
            .await
    }

    /// Fetches everything the dashboard shows, concurrently.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, ClientError> {
        let (summary, by_category, trend, budgets, recent) = tokio::try_join!(
            self.summary(),
            self.expenses_by_category(),
            self.monthly_trend(TREND_MONTHS),
            self.budgets(),
            self.recent_transactions(RECENT_TRANSACTIONS),
        )?;
        debug!(
            "Fetched snapshot: {} budgets, {} recent transactions",
            budgets.len(),
            recent.len()
        );
        Ok(Snapshot {
            summary,
            by_category,
            trend,
            budgets,
            recent,
            fetched_at: Local::now().naive_local(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slashes() {
        let client = ApiClient::new("http://localhost:8000/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.endpoint("/budgets/"),
            "http://localhost:8000/budgets/"
        );
        assert_eq!(
            client.endpoint("analytics/summary"),
            "http://localhost:8000/analytics/summary"
        );
    }

    #[test]
    fn urls_without_a_scheme_are_rejected() {
        assert!(matches!(
            ApiClient::new("localhost:8000", None, Duration::from_secs(1)),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
