//! Base page behaviour shared by all page objects.
//!
//! A [`BasePage`] wraps the shared session with the harness-wide policies:
//! the single interaction funnel, assertion helpers, screenshot layout, and
//! the navigation-error policy. Navigation failures are logged and swallowed
//! by default so that a flaky redirect does not abort a flow mid-test; set
//! [`PageConfig::with_propagate_navigation_errors`] to fail fast instead.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::action::{self, Action};
use crate::locator::{resolve, ElementQuery, Strategy};
use crate::network::{CapturedResponse, ResponsePattern};
use crate::result::{DonarError, DonarResult};
use crate::session::BrowserSession;
use crate::wait::{WaitOptions, DEFAULT_RESPONSE_TIMEOUT_MS};

/// Harness-wide page behaviour knobs
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Directory test artifacts land under
    pub results_dir: PathBuf,
    /// Fail the test on navigation errors instead of logging them
    pub propagate_navigation_errors: bool,
    /// Wait options for element visibility
    pub wait: WaitOptions,
    /// Timeout for response waits in milliseconds
    pub response_timeout_ms: u64,
    /// Write a JSON run report under `results_dir` after each test
    pub write_reports: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("test-results"),
            propagate_navigation_errors: false,
            wait: WaitOptions::default(),
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
            write_reports: false,
        }
    }
}

impl PageConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artifact directory
    #[must_use]
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Propagate navigation errors instead of swallowing them
    #[must_use]
    pub const fn with_propagate_navigation_errors(mut self, propagate: bool) -> Self {
        self.propagate_navigation_errors = propagate;
        self
    }

    /// Set wait options for element visibility
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Set the response wait timeout
    #[must_use]
    pub const fn with_response_timeout(mut self, timeout_ms: u64) -> Self {
        self.response_timeout_ms = timeout_ms;
        self
    }

    /// Write a JSON run report after each test
    #[must_use]
    pub const fn with_write_reports(mut self, write: bool) -> Self {
        self.write_reports = write;
        self
    }
}

/// The shared base every page object is built on.
///
/// Cloning is cheap; clones share the session and config.
#[derive(Clone)]
pub struct BasePage {
    session: Arc<dyn BrowserSession>,
    config: PageConfig,
}

impl BasePage {
    /// Wrap a session with the given config
    #[must_use]
    pub fn new(session: Arc<dyn BrowserSession>, config: PageConfig) -> Self {
        Self { session, config }
    }

    /// The shared session
    #[must_use]
    pub fn session(&self) -> Arc<dyn BrowserSession> {
        Arc::clone(&self.session)
    }

    /// The page config
    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Navigate to a URL.
    ///
    /// Navigation failures are logged and swallowed unless the config says
    /// otherwise; any other session error always propagates.
    pub async fn navigate(&self, url: &str) -> DonarResult<()> {
        match self.session.goto(url).await {
            Ok(()) => Ok(()),
            Err(err @ DonarError::Navigation { .. }) => {
                if self.config.propagate_navigation_errors {
                    Err(err)
                } else {
                    warn!(url, error = %err, "navigation failed, continuing");
                    Ok(())
                }
            }
            Err(other) => Err(other),
        }
    }

    /// Perform one interaction through the dispatch funnel
    pub async fn interact(&self, strategy: Strategy, raw: &str, action: Action) -> DonarResult<()> {
        action::dispatch(self.session.as_ref(), strategy, raw, action).await
    }

    /// Click the element located by `(strategy, raw)`
    pub async fn click(&self, strategy: Strategy, raw: &str) -> DonarResult<()> {
        self.interact(strategy, raw, Action::Click).await
    }

    /// Fill the element located by `(strategy, raw)` with `payload`
    pub async fn fill(&self, strategy: Strategy, raw: &str, payload: &str) -> DonarResult<()> {
        self.interact(strategy, raw, Action::fill(payload)).await
    }

    /// Wait until the located element is visible
    pub async fn expect_visible(&self, strategy: Strategy, raw: &str) -> DonarResult<()> {
        let query = resolve(strategy, raw)?;
        self.session.wait_for_visible(&query, self.config.wait).await
    }

    /// Wait until the exact text is visible on the page
    pub async fn expect_text_visible(&self, text: &str) -> DonarResult<()> {
        self.expect_visible(Strategy::Text, text).await
    }

    /// Assert the located element's text equals `expected` exactly
    pub async fn expect_exact_text(
        &self,
        strategy: Strategy,
        raw: &str,
        expected: &str,
    ) -> DonarResult<()> {
        let query = resolve(strategy, raw)?;
        let actual = self.session.text_content(&query).await?;
        if actual == expected {
            Ok(())
        } else {
            Err(DonarError::Assertion {
                message: format!(
                    "text of {} was '{actual}', expected '{expected}'",
                    query.key()
                ),
            })
        }
    }

    /// Assert the located element's text contains `fragment`
    pub async fn expect_text_contains(
        &self,
        strategy: Strategy,
        raw: &str,
        fragment: &str,
    ) -> DonarResult<()> {
        let query = resolve(strategy, raw)?;
        let actual = self.session.text_content(&query).await?;
        if actual.contains(fragment) {
            Ok(())
        } else {
            Err(DonarError::Assertion {
                message: format!(
                    "text of {} was '{actual}', expected it to contain '{fragment}'",
                    query.key()
                ),
            })
        }
    }

    /// Read the located element's text content
    pub async fn text_of(&self, strategy: Strategy, raw: &str) -> DonarResult<String> {
        let query = resolve(strategy, raw)?;
        self.session.text_content(&query).await
    }

    /// Read the located input's current value
    pub async fn value_of(&self, strategy: Strategy, raw: &str) -> DonarResult<String> {
        let query = resolve(strategy, raw)?;
        self.session.input_value(&query).await
    }

    /// Wait for a response matching the pattern
    pub async fn wait_for_response(
        &self,
        pattern: &ResponsePattern,
    ) -> DonarResult<CapturedResponse> {
        let wait = self.config.wait.with_timeout(self.config.response_timeout_ms);
        self.session.wait_for_response(pattern, wait).await
    }

    /// Wait for a resolved query to become visible, bypassing strategy sugar
    pub async fn wait_for_query(&self, query: &ElementQuery) -> DonarResult<()> {
        self.session.wait_for_visible(query, self.config.wait).await
    }

    /// Capture a full-page screenshot under `results_dir/screenshot/{step}.png`
    pub async fn screenshot(&self, step: &str) -> DonarResult<PathBuf> {
        let path = self
            .config
            .results_dir
            .join("screenshot")
            .join(format!("{step}.png"));
        self.session.screenshot(&path, true).await?;
        info!(step, path = %path.display(), "captured screenshot");
        Ok(path)
    }

    /// The page title
    pub async fn title(&self) -> DonarResult<String> {
        self.session.title().await
    }

    /// The current URL
    #[must_use]
    pub fn current_url(&self) -> String {
        self.session.url()
    }
}

impl std::fmt::Debug for BasePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasePage")
            .field("config", &self.config)
            .field("url", &self.current_url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSession;

    fn page_over(session: &MockSession) -> BasePage {
        BasePage::new(Arc::new(session.clone()), PageConfig::default())
    }

    #[tokio::test]
    async fn test_navigation_error_swallowed_by_default() {
        let session = MockSession::builder()
            .fail_navigation("net::ERR_NAME_NOT_RESOLVED")
            .build();
        let page = page_over(&session);

        page.navigate("https://donate.example.org").await.unwrap();
        assert!(session.visited_urls().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_error_propagated_when_configured() {
        let session = MockSession::builder()
            .fail_navigation("net::ERR_NAME_NOT_RESOLVED")
            .build();
        let config = PageConfig::default().with_propagate_navigation_errors(true);
        let page = BasePage::new(Arc::new(session), config);

        let err = page.navigate("https://donate.example.org").await.unwrap_err();
        assert!(matches!(err, DonarError::Navigation { .. }));
    }

    #[tokio::test]
    async fn test_successful_navigation_is_recorded() {
        let session = MockSession::builder().build();
        let page = page_over(&session);

        page.navigate("https://donate.example.org").await.unwrap();
        assert_eq!(
            session.visited_urls(),
            vec!["https://donate.example.org".to_string()]
        );
        assert_eq!(page.current_url(), "https://donate.example.org");
    }

    #[tokio::test]
    async fn test_click_and_fill_go_through_dispatch() {
        let session = MockSession::builder().build();
        let page = page_over(&session);

        page.click(Strategy::Id, "continue").await.unwrap();
        page.fill(Strategy::Label, "Postcode", "SW1A 1AA").await.unwrap();

        assert_eq!(session.clicked_keys(), vec!["css=#continue".to_string()]);
        assert_eq!(
            session.filled_values().get("label=Postcode"),
            Some(&"SW1A 1AA".to_string())
        );
    }

    #[tokio::test]
    async fn test_dispatch_errors_surface_unchanged() {
        let session = MockSession::builder().build();
        let page = page_over(&session);

        let err = page
            .interact(Strategy::Text, "Continue", Action::fill("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, DonarError::UnsupportedAction { .. }));
    }

    #[tokio::test]
    async fn test_expect_exact_text() {
        let session = MockSession::builder()
            .with_text("css=#total", "£20.00")
            .build();
        let page = page_over(&session);

        page.expect_exact_text(Strategy::Id, "total", "£20.00")
            .await
            .unwrap();
        let err = page
            .expect_exact_text(Strategy::Id, "total", "£25.00")
            .await
            .unwrap_err();
        assert!(matches!(err, DonarError::Assertion { .. }));
    }

    #[tokio::test]
    async fn test_expect_text_contains() {
        let session = MockSession::builder()
            .with_text("css=#reference", "Your reference number is DON-1234")
            .build();
        let page = page_over(&session);

        page.expect_text_contains(Strategy::Id, "reference", "DON-1234")
            .await
            .unwrap();
        assert!(page
            .expect_text_contains(Strategy::Id, "reference", "DON-9999")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_screenshot_layout() {
        let dir = tempfile::tempdir().unwrap();
        let session = MockSession::builder().build();
        let config = PageConfig::default().with_results_dir(dir.path());
        let page = BasePage::new(Arc::new(session), config);

        let path = page.screenshot("donation-complete").await.unwrap();
        assert_eq!(
            path,
            dir.path().join("screenshot").join("donation-complete.png")
        );
        assert!(path.exists());
    }
}
