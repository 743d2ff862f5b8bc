use super::{ListingSource, SourceError};
use rand::Rng;
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

const USER_AGENT: &str = concat!("listing_finder/", env!("CARGO_PKG_VERSION"));

const MAX_ATTEMPTS: u64 = 3;
const MAX_BACKOFF_SECS: u64 = 10;
const JITTER_MAX_SECS: u64 = 2;

/// Published spreadsheet exported as CSV.
pub struct SheetSource {
    client: Client,
    url: String,
}

impl SheetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    fn fetch_csv(&self) -> Result<String, SourceError> {
        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            let start = Instant::now();

            match self.try_fetch_csv() {
                Ok(text) => {
                    tracing::debug!(attempt, elapsed = ?start.elapsed(), "sheet fetched");
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(attempt, elapsed = ?start.elapsed(), error = %e, "sheet fetch failed");
                    last_err = Some(e);

                    if attempt < MAX_ATTEMPTS {
                        let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                        std::thread::sleep(Duration::from_secs(base + jitter));
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| SourceError::Network("sheet retry loop failed".into())))
    }

    fn try_fetch_csv(&self) -> Result<String, SourceError> {
        let resp = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SourceError::Network(format!("sheet HTTP {status}")));
        }
        Ok(text)
    }
}

impl ListingSource for SheetSource {
    fn name(&self) -> &'static str {
        "sheet"
    }

    fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        let text = self.fetch_csv()?;
        Ok(parse_csv(&text))
    }
}

/// Plain comma split with a header row. Quoted fields are not supported; the sheet is
/// expected to keep commas out of cells. Short rows are padded with empty strings and
/// blank lines are skipped.
pub fn parse_csv(text: &str) -> Vec<Value> {
    let mut lines = text.trim().lines();

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header.split(',').map(str::trim).collect();

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            let row: Map<String, Value> = headers
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let cell = cells.get(i).copied().unwrap_or("");
                    (h.to_string(), Value::String(cell.to_string()))
                })
                .collect();
            Value::Object(row)
        })
        .collect()
}
