use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::data::{
    CountryShare, Demographic, ModelSales, ModelShare, PenetrationPoint, QuarterlyShare,
    RegionRevenue, RegionSummary, RevenuePoint, Sentiment, Stats,
};

/// Flask development server default.
pub const DEFAULT_BASE: &str = "http://127.0.0.1:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

static BASE: OnceLock<String> = OnceLock::new();
static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Pin the API base URL for the process: CLI flag first, then the
/// `IREVOLUTION_API_BASE` environment variable, then the default.
pub fn configure(cli_base: Option<String>) {
    let base = cli_base
        .or_else(|| std::env::var("IREVOLUTION_API_BASE").ok())
        .unwrap_or_else(|| DEFAULT_BASE.to_string());
    let base = base.trim_end_matches('/').to_string();
    _ = BASE.set(base);
}

pub fn base_url() -> &'static str {
    BASE.get().map_or(DEFAULT_BASE, String::as_str)
}

fn client() -> &'static reqwest::Client {
    CLIENT.get_or_init(reqwest::Client::new)
}

/// GET `endpoint` and parse the JSON body. Network and decode failures
/// propagate to the caller untouched.
pub async fn get<T: DeserializeOwned>(endpoint: &str) -> Result<T> {
    let url = format!("{}{endpoint}", base_url());
    let response = client()
        .get(&url)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url}"))?;
    let parsed = response
        .json()
        .await
        .with_context(|| format!("decode {endpoint}"))?;
    Ok(parsed)
}

pub async fn fetch_stats() -> Result<Stats> {
    get("/api/stats").await
}

pub async fn fetch_revenue() -> Result<Vec<RevenuePoint>> {
    get("/api/revenue").await
}

pub async fn fetch_penetration() -> Result<Vec<PenetrationPoint>> {
    get("/api/penetration").await
}

pub async fn fetch_region_revenue() -> Result<Vec<RegionRevenue>> {
    get("/api/region-revenue").await
}

pub async fn fetch_model_share() -> Result<Vec<ModelShare>> {
    get("/api/model-share").await
}

pub async fn fetch_country_share() -> Result<Vec<CountryShare>> {
    get("/api/country-share").await
}

pub async fn fetch_quarterly() -> Result<Vec<QuarterlyShare>> {
    get("/api/quarterly").await
}

pub async fn fetch_sales_summary() -> Result<Vec<RegionSummary>> {
    get("/api/sales-summary").await
}

pub async fn fetch_sales_by_model() -> Result<Vec<ModelSales>> {
    get("/api/sales-by-model").await
}

pub async fn fetch_demographics() -> Result<Vec<Demographic>> {
    get("/api/demographics").await
}

pub async fn fetch_sentiment() -> Result<Vec<Sentiment>> {
    get("/api/sentiment").await
}

/// Shown when the API cannot be reached at startup.
pub fn config_guide() -> String {
    indoc::formatdoc! {"
        The terminal reads from the iRevolution analytics API.

        Start the backend, or point the terminal at a running instance:

          IREVOLUTION_API_BASE   base URL of the API (current: {base})
          --api-base <url>       same, as a command line flag

        The backend serves /api/stats, /api/revenue and friends.
    ", base = base_url()}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_falls_back_to_the_flask_default() {
        // configure() may or may not have run in this process; either
        // way the value must be a usable absolute URL without a
        // trailing slash.
        let base = base_url();
        assert!(base.starts_with("http"));
        assert!(!base.ends_with('/'));
    }

    #[test]
    fn config_guide_names_the_override_knobs() {
        let guide = config_guide();
        assert!(guide.contains("IREVOLUTION_API_BASE"));
        assert!(guide.contains("--api-base"));
    }
}
