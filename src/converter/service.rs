use super::rates::{RateTable, RatesResponse};
use crate::config::Config;
use crate::error::TriptychError;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Build the HTTP client used for the rate fetch.
pub fn build_client(cfg: &Config) -> Result<reqwest::Client, TriptychError> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(proxy_url) = cfg.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }
    if let Some(secs) = cfg.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// One GET against the rate endpoint. No retry.
pub async fn fetch_rates(client: &reqwest::Client, url: &Url) -> Result<RateTable, TriptychError> {
    let resp = client
        .get(url.clone())
        .header(ACCEPT, "application/json")
        .send()
        .await?
        .error_for_status()?;
    let body = resp.bytes().await?;
    let parsed: RatesResponse = serde_json::from_slice(&body)?;
    debug!(
        base = parsed.base.as_deref().unwrap_or("<none>"),
        quotes = parsed.rates.len(),
        "rate response parsed"
    );
    let table = RateTable::from_response(&parsed)?;
    info!(url = %url, pairs = table.len(), "exchange rates loaded");
    Ok(table)
}
