//! Hack The Box source (API v4, bearer token)

use super::{display_value, read_json, StatSource};
use crate::types::{Config, FetchError, FetchResult, HackTheBoxStats, UNKNOWN_RANK};
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    profile: Profile,
}

#[derive(Debug, Default, Deserialize)]
struct Profile {
    #[serde(default)]
    rank: Value,
    #[serde(default)]
    owns: Owns,
    #[serde(default)]
    challenge_solves: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct Owns {
    #[serde(default)]
    user: u64,
    #[serde(default)]
    system: u64,
}

pub struct HackTheBoxSource<'a> {
    client: &'a Client,
    base_url: &'a str,
    api_key: Option<&'a str>,
    user_id: Option<&'a str>,
}

impl<'a> HackTheBoxSource<'a> {
    pub fn new(
        client: &'a Client,
        base_url: &'a str,
        api_key: Option<&'a str>,
        user_id: Option<&'a str>,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            user_id,
        }
    }

    pub fn from_config(client: &'a Client, config: &'a Config) -> Self {
        Self::new(
            client,
            &config.endpoints.hackthebox,
            config.hackthebox_api_key.as_deref(),
            config.hackthebox_user_id.as_deref(),
        )
    }
}

impl StatSource for HackTheBoxSource<'_> {
    type Record = HackTheBoxStats;

    fn name(&self) -> &'static str {
        "hackthebox"
    }

    fn fetch(&self) -> FetchResult<HackTheBoxStats> {
        let api_key = self
            .api_key
            .ok_or(FetchError::NotConfigured("HTB_API_KEY"))?;
        let user_id = self
            .user_id
            .ok_or(FetchError::NotConfigured("HTB_USER_ID"))?;

        let url = format!("{}/api/v4/user/profile/basic/{}", self.base_url, user_id);
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json")
            .send()?;

        let body: ProfileResponse = read_json(response)?;
        Ok(build_stats(body.profile))
    }
}

fn build_stats(profile: Profile) -> HackTheBoxStats {
    let rank = match &profile.rank {
        Value::Null => UNKNOWN_RANK.to_string(),
        other => display_value(other),
    };

    HackTheBoxStats {
        rank,
        owns: profile.owns.user.saturating_add(profile.owns.system),
        solves: profile.challenge_solves.unwrap_or(0),
    }
}
