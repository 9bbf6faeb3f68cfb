//! Headless browser sessions for client-rendered pages
//!
//! A [`PageSession`] owns one browser page and closes it when dropped, so the
//! browser process is released on success, on error returns, and while
//! unwinding from a panic.

use crate::types::{FetchError, FetchResult};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Launches isolated browser pages
pub trait PageRenderer {
    fn open(&self) -> FetchResult<Box<dyn RenderedPage>>;
}

/// One open page in a running browser
pub trait RenderedPage {
    /// Load `url` and wait for the navigation to finish
    fn navigate(&mut self, url: &str) -> FetchResult<()>;

    /// Poll until an element matching `selector` exists, then return its
    /// displayed text unchanged
    fn text_of(&mut self, selector: &str, timeout: Duration) -> FetchResult<String>;

    /// Release the page and its browser. Must tolerate repeated calls.
    fn close(&mut self);
}

/// Scoped handle around a [`RenderedPage`]; closing happens in `Drop`
pub struct PageSession {
    page: Box<dyn RenderedPage>,
}

impl PageSession {
    pub fn open(renderer: &dyn PageRenderer) -> FetchResult<Self> {
        let page = renderer.open()?;
        debug!("browser session opened");
        Ok(Self { page })
    }

    pub fn navigate(&mut self, url: &str) -> FetchResult<()> {
        debug!(url, "navigating");
        self.page.navigate(url)
    }

    pub fn text_of(&mut self, selector: &str, timeout: Duration) -> FetchResult<String> {
        self.page.text_of(selector, timeout)
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.page.close();
        debug!("browser session closed");
    }
}

/// Chrome/Chromium driven over the DevTools protocol
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    /// Chrome exits on its own after this long without commands
    idle_timeout: Duration,
}

impl ChromeRenderer {
    pub fn new(idle_timeout: Duration) -> Self {
        Self { idle_timeout }
    }
}

impl PageRenderer for ChromeRenderer {
    fn open(&self) -> FetchResult<Box<dyn RenderedPage>> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .idle_browser_timeout(self.idle_timeout)
            .build()
            .map_err(|e| FetchError::Browser(format!("invalid launch options: {}", e)))?;

        let browser = Browser::new(options).map_err(browser_error)?;
        let tab = browser.new_tab().map_err(browser_error)?;

        Ok(Box::new(ChromePage {
            browser: Some(browser),
            tab,
        }))
    }
}

struct ChromePage {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl RenderedPage for ChromePage {
    fn navigate(&mut self, url: &str) -> FetchResult<()> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map(|_| ())
            .map_err(browser_error)
    }

    fn text_of(&mut self, selector: &str, timeout: Duration) -> FetchResult<String> {
        let element = self
            .tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|e| FetchError::Browser(format!("{}: {}", selector, e)))?;
        element.get_inner_text().map_err(browser_error)
    }

    fn close(&mut self) {
        // Dropping the Browser kills the Chrome process
        if let Some(browser) = self.browser.take() {
            let _ = self.tab.close(false);
            drop(browser);
        }
    }
}

fn browser_error(e: impl std::fmt::Display) -> FetchError {
    FetchError::Browser(e.to_string())
}
