// src/fetch.rs
//! Fetch & isolation layer.
//!
//! Every fetch-and-extract cycle runs in a freshly spawned worker that owns
//! its own tokio runtime and its own `reqwest::Client`, so no client,
//! session, or reactor state carries over between crawls. Only plain
//! serializable data crosses back, through a one-shot channel, and the
//! worker is always joined.
//!
//! The HTTP request itself is retried with doubling backoff (capped) on
//! rate-limit and server-error statuses and on transport errors; all other
//! outcomes fail immediately. Parsing is never retried.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tokio::time::sleep;

use crate::charts::ChartSpec;
use crate::config::FetchOptions;
use crate::error::ChartError;
use crate::extract::page::scan_page;
use crate::extract::{PageMeta, RawEntry};

/// HTTP statuses worth retrying: rate-limited and server errors.
const RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Everything a worker sends back to the caller. Plain data only.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WorkerOutput {
    pub records: Vec<RawEntry>,
    pub meta: PageMeta,
}

/// Fetch and extract one chart page inside an isolated worker.
///
/// Blocks until the worker terminates. Zero extracted records is reported
/// as `FetchFailure`: an empty chart page is indistinguishable from a
/// broken one, so "no data" is treated as failure by policy.
pub fn fetch_isolated(
    chart: &'static ChartSpec,
    options: &FetchOptions,
) -> Result<WorkerOutput, ChartError> {
    let (tx, rx) = mpsc::sync_channel::<Result<WorkerOutput, String>>(1);
    let opts = options.clone();

    let handle = thread::Builder::new()
        .name("mchart-fetch".to_string())
        .spawn(move || {
            let _ = tx.send(run_fetch_cycle(chart, &opts));
        })
        .map_err(|e| ChartError::fetch(format!("failed to spawn fetch worker: {e}")))?;

    let received = rx.recv();
    // Join unconditionally; the worker has already sent (or dropped) its result.
    let joined = handle.join();

    if joined.is_err() {
        return Err(ChartError::fetch("fetch worker panicked"));
    }
    let output = match received {
        Ok(result) => result.map_err(ChartError::fetch)?,
        Err(_) => return Err(ChartError::fetch("fetch worker returned no data")),
    };
    reject_empty(chart, output)
}

/// Apply the "no data returned" policy shared by HTTP and fixture paths.
pub(crate) fn reject_empty(
    chart: &ChartSpec,
    output: WorkerOutput,
) -> Result<WorkerOutput, ChartError> {
    if output.records.is_empty() {
        return Err(ChartError::fetch(format!(
            "no data returned for chart '{}'",
            chart.id
        )));
    }
    Ok(output)
}

/// Worker body: fresh runtime, fresh client, fetch with retry, extract.
fn run_fetch_cycle(chart: &ChartSpec, options: &FetchOptions) -> Result<WorkerOutput, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("building worker runtime: {e}"))?;

    runtime.block_on(async {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()
            .map_err(|e| format!("building http client: {e}"))?;

        let url = chart.url();
        let body = fetch_page_with_retry(&client, &url, options).await?;

        let (meta, records) =
            scan_page(&body, &url, chart, options.include_images, options.max_entries);
        tracing::debug!(chart = chart.id, records = records.len(), "page scan finished");
        Ok(WorkerOutput { records, meta })
    })
}

async fn fetch_page_with_retry(
    client: &reqwest::Client,
    url: &str,
    options: &FetchOptions,
) -> Result<String, String> {
    let attempts = options.max_retries.max(1);
    let cap = Duration::from_millis(options.backoff_cap_ms);
    let mut delay = Duration::from_millis(options.backoff_base_ms);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match client.get(url).send().await {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    return resp
                        .text()
                        .await
                        .map_err(|e| format!("reading response body: {e}"));
                }
                if !RETRYABLE_STATUSES.contains(&status.as_u16()) {
                    return Err(format!("http status {status} for {url}"));
                }
                tracing::warn!(%url, %status, attempt, "retryable http status");
                last_error = format!("http status {status} for {url}");
            }
            Err(e) => {
                tracing::warn!(%url, error = ?e, attempt, "http request error");
                last_error = format!("http request error for {url}: {e}");
            }
        }

        if attempt < attempts {
            sleep(delay).await;
            delay = (delay * 2).min(cap);
        }
    }

    Err(format!(
        "all {attempts} fetch attempts failed: {last_error}"
    ))
}
