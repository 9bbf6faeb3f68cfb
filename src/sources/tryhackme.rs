//! TryHackMe source: rank lookup plus badge list

use super::{display_value, is_truthy, read_json, StatSource};
use crate::types::{Config, FetchError, FetchResult, TryHackMeStats, UNKNOWN_RANK};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

/// Rank endpoint response (minimal fields)
#[derive(Debug, Default, Deserialize)]
struct RankResponse {
    #[serde(default)]
    rank: Value,
    #[serde(default, rename = "completedRooms")]
    completed_rooms: Option<u64>,
}

pub struct TryHackMeSource<'a> {
    client: &'a Client,
    base_url: &'a str,
    username: Option<&'a str>,
}

impl<'a> TryHackMeSource<'a> {
    pub fn new(client: &'a Client, base_url: &'a str, username: Option<&'a str>) -> Self {
        Self {
            client,
            base_url,
            username,
        }
    }

    pub fn from_config(client: &'a Client, config: &'a Config) -> Self {
        Self::new(
            client,
            &config.endpoints.tryhackme,
            config.tryhackme_username.as_deref(),
        )
    }

    fn get(&self, path: &str, username: &str) -> FetchResult<reqwest::blocking::Response> {
        let url = format!("{}/api/user/{}/{}", self.base_url, path, username);
        Ok(self.client.get(url).send()?)
    }
}

impl StatSource for TryHackMeSource<'_> {
    type Record = TryHackMeStats;

    fn name(&self) -> &'static str {
        "tryhackme"
    }

    fn fetch(&self) -> FetchResult<TryHackMeStats> {
        let username = self
            .username
            .ok_or(FetchError::NotConfigured("THM_USERNAME"))?;

        let rank: RankResponse = read_json(self.get("rank", username)?)?;
        let badges: Value = read_json(self.get("badges", username)?)?;

        Ok(build_stats(&rank, &badges))
    }
}

/// Normalize both responses. A badges body that is not a list (e.g., an
/// error object) counts as zero badges.
fn build_stats(rank: &RankResponse, badges: &Value) -> TryHackMeStats {
    let rank_label = if is_truthy(&rank.rank) {
        format!("Top {}%", display_value(&rank.rank))
    } else {
        UNKNOWN_RANK.to_string()
    };

    TryHackMeStats {
        rank: rank_label,
        badges: badges.as_array().map_or(0, |list| list.len() as u64),
        rooms: rank.completed_rooms.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{http_client, with_blocking_client};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rank_response(value: Value) -> RankResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_build_stats_full() {
        let rank = rank_response(json!({"rank": 3, "completedRooms": 87}));
        let badges = json!([{"name": "streak"}, {"name": "mr-robot"}]);

        let stats = build_stats(&rank, &badges);

        assert_eq!(stats.rank, "Top 3%");
        assert_eq!(stats.badges, 2);
        assert_eq!(stats.rooms, 87);
    }

    #[test]
    fn test_build_stats_badges_not_a_list() {
        let rank = rank_response(json!({"rank": "1"}));
        let badges = json!({"error": "user not found"});

        let stats = build_stats(&rank, &badges);

        assert_eq!(stats.badges, 0);
        assert_eq!(stats.rank, "Top 1%");
    }

    #[test]
    fn test_build_stats_missing_fields_default() {
        let rank = rank_response(json!({}));

        let stats = build_stats(&rank, &json!([]));

        assert_eq!(stats.rank, UNKNOWN_RANK);
        assert_eq!(stats.badges, 0);
        assert_eq!(stats.rooms, 0);
    }

    #[test]
    fn test_build_stats_zero_rank_is_unknown() {
        let rank = rank_response(json!({"rank": 0, "completedRooms": null}));

        let stats = build_stats(&rank, &json!([]));

        assert_eq!(stats.rank, UNKNOWN_RANK);
        assert_eq!(stats.rooms, 0);
    }

    #[test]
    fn test_fetch_without_username_skips_network() {
        let client = http_client(Duration::from_secs(1)).unwrap();
        // Unroutable base: any request would surface as Transport, not NotConfigured
        let source = TryHackMeSource::new(&client, "http://127.0.0.1:9", None);

        let err = source.fetch().unwrap_err();

        assert!(err.is_not_configured());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/rank/alice"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"rank": 2, "completedRooms": 120})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user/badges/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{}, {}, {}])))
            .mount(&server)
            .await;

        let base = server.uri();
        let stats = with_blocking_client(move |client| {
            TryHackMeSource::new(client, &base, Some("alice")).fetch()
        })
        .await
        .unwrap();

        assert_eq!(
            stats,
            TryHackMeStats {
                rank: "Top 2%".into(),
                badges: 3,
                rooms: 120,
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_badges_error_status_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/rank/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rank": 2})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user/badges/alice"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let base = server.uri();
        let result = with_blocking_client(move |client| {
            TryHackMeSource::new(client, &base, Some("alice")).fetch()
        })
        .await;

        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_rank_not_an_object_is_parse_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/rank/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"maintenance\""))
            .mount(&server)
            .await;

        let base = server.uri();
        let result = with_blocking_client(move |client| {
            TryHackMeSource::new(client, &base, Some("alice")).fetch()
        })
        .await;

        assert!(matches!(result, Err(FetchError::Parse(_))));
    }
}
