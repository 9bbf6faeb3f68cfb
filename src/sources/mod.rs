//! Stat sources: one fetcher per external service

mod browser;
mod hackthebox;
mod leetcode;
mod monkeytype;
mod tryhackme;

pub use browser::{ChromeRenderer, PageRenderer};
pub use hackthebox::HackTheBoxSource;
pub use leetcode::LeetCodeSource;
pub use monkeytype::MonkeytypeSource;
pub use tryhackme::TryHackMeSource;

#[cfg(test)]
pub(crate) use browser::fake as browser_fake;

use crate::types::{FetchError, FetchResult};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A service that yields one stat record per run
pub trait StatSource {
    type Record;

    /// Output key (e.g., "leetcode")
    fn name(&self) -> &'static str;

    /// Fetch and normalize this service's stats
    fn fetch(&self) -> FetchResult<Self::Record>;

    /// Fetch, logging and discarding the failure reason.
    /// Failures, panics included, never propagate past this point.
    fn fetch_or_absent(&self) -> Option<Self::Record> {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| self.fetch())) {
            Ok(outcome) => outcome,
            Err(payload) => {
                warn!(
                    source = self.name(),
                    panic = panic_message(payload.as_ref()),
                    "fetcher panicked"
                );
                return None;
            }
        };

        match outcome {
            Ok(record) => {
                info!(source = self.name(), "fetched stats");
                Some(record)
            }
            Err(e) if e.is_not_configured() => {
                debug!(source = self.name(), reason = %e, "skipping source");
                None
            }
            Err(e) => {
                warn!(source = self.name(), error = %e, "failed to fetch stats");
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Build the blocking HTTP client shared by all API sources
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Reject non-success statuses, then decode the body.
/// Decoding is done here rather than with `Response::json` so that shape
/// errors are reported as `Parse` instead of `Transport`.
fn read_json<T: DeserializeOwned>(response: Response) -> FetchResult<T> {
    let body = response.error_for_status()?.text()?;
    serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Loose truthiness for values that may come back as number, string or null
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a scalar for display without JSON quoting
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Run a blocking client call off the async test runtime.
/// The blocking client owns its own runtime and must not be driven from
/// inside another one.
#[cfg(test)]
pub(crate) async fn with_blocking_client<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&Client) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let client = http_client(Duration::from_secs(5)).unwrap();
        f(&client)
    })
    .await
    .unwrap()
}
