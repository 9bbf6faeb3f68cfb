//! Aggregator service: runs every source once and assembles the stats document

use crate::sources::{
    http_client, HackTheBoxSource, LeetCodeSource, MonkeytypeSource, PageRenderer, StatSource,
    TryHackMeSource,
};
use crate::types::{Config, Result, Stats};
use reqwest::blocking::Client;
use tracing::info;

/// Runs all sources sequentially against one shared HTTP client
pub struct Aggregator<'a> {
    config: &'a Config,
    client: Client,
    renderer: &'a dyn PageRenderer,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a Config, renderer: &'a dyn PageRenderer) -> Result<Self> {
        let client = http_client(config.http_timeout)?;
        Ok(Self {
            config,
            client,
            renderer,
        })
    }

    /// Fetch every service. A failing source becomes `None`; it never stops
    /// the remaining sources.
    pub fn collect(&self) -> Stats {
        let stats = Stats {
            tryhackme: TryHackMeSource::from_config(&self.client, self.config).fetch_or_absent(),
            hackthebox: HackTheBoxSource::from_config(&self.client, self.config).fetch_or_absent(),
            leetcode: LeetCodeSource::from_config(&self.client, self.config).fetch_or_absent(),
            monkeytype: MonkeytypeSource::from_config(self.renderer, self.config)
                .fetch_or_absent(),
        };

        info!(fetched = stats.fetched_count(), total = 4, "collected stats");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::output;
    use crate::sources::browser_fake::FakeRenderer;
    use crate::types::{Endpoints, LeetCodeStats};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn offline_config() -> Config {
        let unroutable = "http://127.0.0.1:9".to_string();
        Config {
            endpoints: Endpoints {
                tryhackme: unroutable.clone(),
                hackthebox: unroutable.clone(),
                leetcode: unroutable.clone(),
                monkeytype: unroutable,
            },
            http_timeout: Duration::from_secs(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_unconfigured_run_is_all_null() {
        let config = offline_config();
        let renderer = FakeRenderer::default();

        let stats = Aggregator::new(&config, &renderer).unwrap().collect();

        assert_eq!(stats, Stats::default());
        assert!(renderer.events().is_empty());
    }

    #[test]
    fn test_failing_source_does_not_stop_others() {
        // tryhackme points at a closed port; monkeytype uses manual values
        let config = Config {
            tryhackme_username: Some("alice".into()),
            monkeytype_wpm_15s: Some("120+".into()),
            monkeytype_wpm_60s: Some("110+".into()),
            ..offline_config()
        };
        let renderer = FakeRenderer::default();

        let stats = Aggregator::new(&config, &renderer).unwrap().collect();

        assert!(stats.tryhackme.is_none());
        assert_eq!(stats.monkeytype.unwrap().wpm_15s, "120+");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_panicking_scrape_keeps_other_sources() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "matchedUser": {
                        "submitStats": {
                            "acSubmissionNum": [{"difficulty": "All", "count": 77}]
                        },
                        "profile": {"ranking": 5000}
                    }
                }
            })))
            .mount(&server)
            .await;

        let mut config = Config {
            leetcode_username: Some("bob".into()),
            monkeytype_username: Some("carol".into()),
            ..offline_config()
        };
        config.endpoints.leetcode = server.uri();

        let (stats, closed) = tokio::task::spawn_blocking(move || {
            let renderer = FakeRenderer {
                panic_on_lookup: true,
                ..Default::default()
            };
            let stats = Aggregator::new(&config, &renderer).unwrap().collect();
            (stats, renderer.closed())
        })
        .await
        .unwrap();

        assert!(stats.monkeytype.is_none());
        assert_eq!(closed, 1);
        assert_eq!(
            stats.leetcode,
            Some(LeetCodeStats {
                solved: 77,
                rank: "5,000".into(),
            })
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_leetcode_only_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "allQuestionsCount": [
                        {"difficulty": "All", "count": 3300},
                        {"difficulty": "Easy", "count": 830}
                    ],
                    "matchedUser": {
                        "submitStats": {
                            "acSubmissionNum": [{"difficulty": "All", "count": 150}]
                        },
                        "profile": {"ranking": 12345}
                    }
                }
            })))
            .mount(&server)
            .await;

        let tmp = TempDir::new().unwrap();
        let out_path = tmp.path().join("stats.json");
        let mut config = Config {
            leetcode_username: Some("bob".into()),
            ..offline_config()
        };
        config.endpoints.leetcode = server.uri();

        let written = out_path.clone();
        let stats = tokio::task::spawn_blocking(move || {
            let renderer = FakeRenderer::default();
            let stats = Aggregator::new(&config, &renderer).unwrap().collect();
            output::write_stats(&written, &stats).unwrap();
            stats
        })
        .await
        .unwrap();

        assert_eq!(
            stats.leetcode,
            Some(LeetCodeStats {
                solved: 150,
                rank: "12,345".into(),
            })
        );

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(
            doc,
            json!({
                "tryhackme": null,
                "hackthebox": null,
                "leetcode": {"solved": 150, "rank": "12,345"},
                "monkeytype": null
            })
        );
    }
}
