//! Monkeytype source: personal bests scraped from the rendered profile page

use super::browser::{PageRenderer, PageSession};
use super::StatSource;
use crate::types::{Config, FetchError, FetchResult, MonkeytypeStats};
use std::time::Duration;

/// Time-mode personal best groups, in page order: 15s, 30s, 60s, 120s
pub const PB_15S_SELECTOR: &str = ".profile .pbsTime .group:nth-child(1) .quick .wpm";
pub const PB_60S_SELECTOR: &str = ".profile .pbsTime .group:nth-child(3) .quick .wpm";

pub struct MonkeytypeSource<'a> {
    renderer: &'a dyn PageRenderer,
    base_url: &'a str,
    username: Option<&'a str>,
    /// Manually maintained (15s, 60s) values; bypasses the browser
    manual: Option<(&'a str, &'a str)>,
    render_timeout: Duration,
}

impl<'a> MonkeytypeSource<'a> {
    pub fn new(
        renderer: &'a dyn PageRenderer,
        base_url: &'a str,
        username: Option<&'a str>,
        render_timeout: Duration,
    ) -> Self {
        Self {
            renderer,
            base_url,
            username,
            manual: None,
            render_timeout,
        }
    }

    pub fn from_config(renderer: &'a dyn PageRenderer, config: &'a Config) -> Self {
        let source = Self::new(
            renderer,
            &config.endpoints.monkeytype,
            config.monkeytype_username.as_deref(),
            config.render_timeout,
        );
        match (&config.monkeytype_wpm_15s, &config.monkeytype_wpm_60s) {
            (Some(wpm_15s), Some(wpm_60s)) => source.with_manual(wpm_15s, wpm_60s),
            _ => source,
        }
    }

    pub fn with_manual(mut self, wpm_15s: &'a str, wpm_60s: &'a str) -> Self {
        self.manual = Some((wpm_15s, wpm_60s));
        self
    }

    fn profile_url(&self, username: &str) -> String {
        format!("{}/profile/{}", self.base_url, username)
    }
}

impl StatSource for MonkeytypeSource<'_> {
    type Record = MonkeytypeStats;

    fn name(&self) -> &'static str {
        "monkeytype"
    }

    fn fetch(&self) -> FetchResult<MonkeytypeStats> {
        if let Some((wpm_15s, wpm_60s)) = self.manual {
            return Ok(MonkeytypeStats {
                wpm_15s: wpm_15s.to_string(),
                wpm_60s: wpm_60s.to_string(),
            });
        }

        let username = self
            .username
            .ok_or(FetchError::NotConfigured("MONKEYTYPE_USERNAME"))?;

        let mut session = PageSession::open(self.renderer)?;
        session.navigate(&self.profile_url(username))?;

        // Text is passed through as displayed, decoration included
        Ok(MonkeytypeStats {
            wpm_15s: session.text_of(PB_15S_SELECTOR, self.render_timeout)?,
            wpm_60s: session.text_of(PB_60S_SELECTOR, self.render_timeout)?,
        })
    }
}
