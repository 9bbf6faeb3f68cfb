use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::logging;
use crate::services::output::{self, DEFAULT_OUTPUT_PATH};
use crate::services::Aggregator;
use crate::sources::ChromeRenderer;
use crate::types::{
    non_empty, Config, Endpoints, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_RENDER_TIMEOUT_SECS,
};

/// Extra idle time Chrome is allowed beyond the render timeout before it exits
const BROWSER_IDLE_GRACE_SECS: u64 = 30;

/// Collect public profile stats into a single JSON file
#[derive(Parser, Debug)]
#[command(name = "profile-stats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TryHackMe username
    #[arg(long, env = "THM_USERNAME", hide_env_values = true)]
    thm_username: Option<String>,

    /// Hack The Box API token
    #[arg(long, env = "HTB_API_KEY", hide_env_values = true)]
    htb_api_key: Option<String>,

    /// Hack The Box numeric user id
    #[arg(long, env = "HTB_USER_ID", hide_env_values = true)]
    htb_user_id: Option<String>,

    /// LeetCode username
    #[arg(long, env = "LEETCODE_USERNAME", hide_env_values = true)]
    leetcode_username: Option<String>,

    /// Monkeytype username (profile page is scraped with headless Chrome)
    #[arg(long, env = "MONKEYTYPE_USERNAME", hide_env_values = true)]
    monkeytype_username: Option<String>,

    /// Fixed 15s WPM; with --monkeytype-wpm-60s, skips scraping
    #[arg(long = "monkeytype-wpm-15s", env = "MONKEYTYPE_15S_WPM")]
    monkeytype_wpm_15s: Option<String>,

    /// Fixed 60s WPM; with --monkeytype-wpm-15s, skips scraping
    #[arg(long = "monkeytype-wpm-60s", env = "MONKEYTYPE_60S_WPM")]
    monkeytype_wpm_60s: Option<String>,

    /// Output file
    #[arg(short, long, env = "STATS_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout", env = "STATS_HTTP_TIMEOUT", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Seconds to wait for the Monkeytype profile to render
    #[arg(long = "render-timeout", env = "STATS_RENDER_TIMEOUT", default_value_t = DEFAULT_RENDER_TIMEOUT_SECS)]
    render_timeout_secs: u64,

    /// Print the document to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        logging::init(self.verbose);

        let config = self.config();
        let renderer = ChromeRenderer::new(
            config.render_timeout + Duration::from_secs(BROWSER_IDLE_GRACE_SECS),
        );
        let stats = Aggregator::new(&config, &renderer)?.collect();

        if self.stdout {
            println!("{}", output::to_pretty_json(&stats)?);
            return Ok(());
        }

        output::write_stats(&self.output, &stats)?;
        println!(
            "Stats successfully fetched and written to {}",
            self.output.display()
        );
        Ok(())
    }

    fn config(&self) -> Config {
        Config {
            tryhackme_username: non_empty(self.thm_username.clone()),
            hackthebox_api_key: non_empty(self.htb_api_key.clone()),
            hackthebox_user_id: non_empty(self.htb_user_id.clone()),
            leetcode_username: non_empty(self.leetcode_username.clone()),
            monkeytype_username: non_empty(self.monkeytype_username.clone()),
            monkeytype_wpm_15s: non_empty(self.monkeytype_wpm_15s.clone()),
            monkeytype_wpm_60s: non_empty(self.monkeytype_wpm_60s.clone()),
            endpoints: Endpoints::default(),
            http_timeout: Duration::from_secs(self.timeout_secs),
            render_timeout: Duration::from_secs(self.render_timeout_secs),
        }
    }
}
