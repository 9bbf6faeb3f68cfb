//! Run configuration, built once at startup and shared by reference

use std::time::Duration;

/// HTTP request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// How long to wait for client-side rendering, in seconds
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 15;

/// Base URLs of the queried services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub tryhackme: String,
    pub hackthebox: String,
    pub leetcode: String,
    pub monkeytype: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            tryhackme: "https://tryhackme.com".into(),
            hackthebox: "https://www.hackthebox.com".into(),
            leetcode: "https://leetcode.com".into(),
            monkeytype: "https://monkeytype.com".into(),
        }
    }
}

/// Credentials and identifiers per service.
///
/// `None` disables exactly that service for the run.
#[derive(Debug, Clone)]
pub struct Config {
    pub tryhackme_username: Option<String>,
    pub hackthebox_api_key: Option<String>,
    pub hackthebox_user_id: Option<String>,
    pub leetcode_username: Option<String>,
    pub monkeytype_username: Option<String>,
    /// Manually maintained personal bests; skip scraping when both are set
    pub monkeytype_wpm_15s: Option<String>,
    pub monkeytype_wpm_60s: Option<String>,
    pub endpoints: Endpoints,
    pub http_timeout: Duration,
    pub render_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tryhackme_username: None,
            hackthebox_api_key: None,
            hackthebox_user_id: None,
            leetcode_username: None,
            monkeytype_username: None,
            monkeytype_wpm_15s: None,
            monkeytype_wpm_60s: None,
            endpoints: Endpoints::default(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            render_timeout: Duration::from_secs(DEFAULT_RENDER_TIMEOUT_SECS),
        }
    }
}

/// Treat empty and whitespace-only values as unset.
/// CI runners export missing secrets as empty strings.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
