//! LeetCode source (GraphQL)

use super::{read_json, StatSource};
use crate::types::{format_number, Config, FetchError, FetchResult, LeetCodeStats};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
  allQuestionsCount {
    difficulty
    count
  }
  matchedUser(username: $username) {
    submitStats: submitStatsGlobal {
      acSubmissionNum {
        difficulty
        count
      }
    }
    profile {
      ranking
    }
  }
}
"#;

/// Difficulty bucket holding the overall solved count
const ALL_DIFFICULTIES: &str = "All";

// Missing containers default to empty; a container that is present but
// null (e.g., `matchedUser` for an unknown user) fails to decode.

#[derive(Debug, Default, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: ProfileData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileData {
    #[serde(default)]
    matched_user: MatchedUser,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    #[serde(default)]
    submit_stats: SubmitStats,
    #[serde(default)]
    profile: UserProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    /// Kept loose: only the "All" entry has to be well-formed
    #[serde(default)]
    ac_submission_num: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct UserProfile {
    #[serde(default)]
    ranking: u64,
}

pub struct LeetCodeSource<'a> {
    client: &'a Client,
    base_url: &'a str,
    username: Option<&'a str>,
}

impl<'a> LeetCodeSource<'a> {
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
            &config.endpoints.leetcode,
            config.leetcode_username.as_deref(),
        )
    }
}

impl StatSource for LeetCodeSource<'_> {
    type Record = LeetCodeStats;

    fn name(&self) -> &'static str {
        "leetcode"
    }

    fn fetch(&self) -> FetchResult<LeetCodeStats> {
        let username = self
            .username
            .ok_or(FetchError::NotConfigured("LEETCODE_USERNAME"))?;

        let body = json!({
            "query": PROFILE_QUERY,
            "variables": { "username": username },
        });
        let response = self
            .client
            .post(format!("{}/graphql", self.base_url))
            .json(&body)
            .send()?;

        let parsed: GraphQlResponse = read_json(response)?;
        build_stats(parsed.data.matched_user)
    }
}

fn build_stats(user: MatchedUser) -> FetchResult<LeetCodeStats> {
    Ok(LeetCodeStats {
        solved: solved_count(&user.submit_stats.ac_submission_num)?,
        rank: format_number(user.profile.ranking),
    })
}

/// Count of the first "All" bucket, or 0 when there is none.
/// An "All" bucket whose count is missing or null fails the whole fetch
/// rather than defaulting; keep it that way.
fn solved_count(buckets: &[Value]) -> FetchResult<u64> {
    let Some(all) = buckets
        .iter()
        .find(|b| b.get("difficulty").and_then(Value::as_str) == Some(ALL_DIFFICULTIES))
    else {
        return Ok(0);
    };

    all.get("count").and_then(Value::as_u64).ok_or_else(|| {
        FetchError::Parse(format!("\"{}\" bucket has no numeric count", ALL_DIFFICULTIES))
    })
}
