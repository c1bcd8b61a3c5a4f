//! Scripted browser session for tests.
//!
//! [`MockSession`] implements [`BrowserSession`] without a browser: the test
//! scripts the page up front (visible texts, input contents, click-triggered
//! reveals and network responses) and afterwards inspects what the flow did
//! through the recorded clicks, fills and visited URLs.
//!
//! By default the session is lenient: any query clicks or fills successfully
//! and is recorded. [`MockSessionBuilder::strict`] restricts interactions to
//! elements registered up front, so a flow test can also prove it never
//! touches anything unexpected.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::locator::ElementQuery;
use crate::network::{CapturedResponse, ResponsePattern};
use crate::result::{DonarError, DonarResult};
use crate::session::BrowserSession;
use crate::wait::WaitOptions;

/// What a scripted click does beyond being recorded
#[derive(Debug, Clone, Default)]
struct ClickEffect {
    /// Texts that become visible after the click
    reveals: Vec<String>,
    /// Texts that stop being visible after the click
    hides: Vec<String>,
    /// Responses observed after the click
    responses: Vec<CapturedResponse>,
    /// URL the page ends up on after the click
    navigates_to: Option<String>,
}

#[derive(Debug, Default)]
struct MockState {
    // Scripted page
    known: HashSet<String>,
    visible_texts: HashSet<String>,
    texts: HashMap<String, String>,
    input_values: HashMap<String, String>,
    effects: HashMap<String, ClickEffect>,
    title: String,
    fail_navigation: Option<String>,

    // Recorded interactions
    clicked: Vec<String>,
    filled: HashMap<String, String>,
    visited: Vec<String>,
    screenshots: Vec<std::path::PathBuf>,
    responses_seen: Vec<CapturedResponse>,
    visibility_checks: usize,
    closed: bool,

    strict: bool,
    current_url: String,
}

impl MockState {
    fn text_visible(&self, text: &str) -> bool {
        self.visible_texts.contains(text)
            || self.texts.values().any(|t| t == text)
    }

    fn check_known(&self, key: &str) -> DonarResult<()> {
        if self.strict && !self.known.contains(key) {
            return Err(DonarError::ElementNotFound {
                query: key.to_string(),
            });
        }
        Ok(())
    }

    fn apply_effect(&mut self, key: &str) {
        let Some(effect) = self.effects.get(key).cloned() else {
            return;
        };
        for text in effect.reveals {
            self.visible_texts.insert(text);
        }
        for text in effect.hides {
            self.visible_texts.remove(&text);
        }
        self.responses_seen.extend(effect.responses);
        if let Some(url) = effect.navigates_to {
            self.current_url = url;
        }
    }
}

/// Builder for [`MockSession`]
#[derive(Debug, Default)]
pub struct MockSessionBuilder {
    state: MockState,
}

impl MockSessionBuilder {
    /// Only allow interactions with registered elements
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.state.strict = true;
        self
    }

    /// Register an element by query key (e.g. `"css=#username"`)
    #[must_use]
    pub fn with_element(mut self, key: impl Into<String>) -> Self {
        self.state.known.insert(key.into());
        self
    }

    /// A text that is visible from the start
    #[must_use]
    pub fn with_visible_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.state.known.insert(format!("text={text}"));
        self.state.visible_texts.insert(text);
        self
    }

    /// Text content of the element with the given query key
    #[must_use]
    pub fn with_text(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        let key = key.into();
        self.state.known.insert(key.clone());
        self.state.texts.insert(key, content.into());
        self
    }

    /// Initial value of the input with the given query key
    #[must_use]
    pub fn with_input_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.state.known.insert(key.clone());
        self.state.input_values.insert(key, value.into());
        self
    }

    /// Page title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.state.title = title.into();
        self
    }

    /// Clicking the element with `key` makes `text` visible
    #[must_use]
    pub fn on_click_reveal(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        let key = key.into();
        self.state.known.insert(key.clone());
        self.state
            .effects
            .entry(key)
            .or_default()
            .reveals
            .push(text.into());
        self
    }

    /// Clicking the element with `key` hides `text`
    #[must_use]
    pub fn on_click_hide(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        let key = key.into();
        self.state.known.insert(key.clone());
        self.state
            .effects
            .entry(key)
            .or_default()
            .hides
            .push(text.into());
        self
    }

    /// Clicking the element with `key` produces a network response
    #[must_use]
    pub fn on_click_respond(mut self, key: impl Into<String>, response: CapturedResponse) -> Self {
        let key = key.into();
        self.state.known.insert(key.clone());
        self.state
            .effects
            .entry(key)
            .or_default()
            .responses
            .push(response);
        self
    }

    /// Clicking the element with `key` lands the page on `url`
    #[must_use]
    pub fn on_click_navigate(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        let key = key.into();
        self.state.known.insert(key.clone());
        self.state.effects.entry(key).or_default().navigates_to = Some(url.into());
        self
    }

    /// Every navigation fails with the given message
    #[must_use]
    pub fn fail_navigation(mut self, message: impl Into<String>) -> Self {
        self.state.fail_navigation = Some(message.into());
        self
    }

    /// Build the session
    #[must_use]
    pub fn build(self) -> MockSession {
        MockSession {
            state: Arc::new(Mutex::new(self.state)),
        }
    }
}

/// A scripted, in-memory [`BrowserSession`]
#[derive(Debug, Clone, Default)]
pub struct MockSession {
    state: Arc<Mutex<MockState>>,
}

impl MockSession {
    /// Start building a scripted session
    #[must_use]
    pub fn builder() -> MockSessionBuilder {
        MockSessionBuilder::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Query keys clicked, in order
    #[must_use]
    pub fn clicked_keys(&self) -> Vec<String> {
        self.lock().clicked.clone()
    }

    /// Last fill per query key
    #[must_use]
    pub fn filled_values(&self) -> HashMap<String, String> {
        self.lock().filled.clone()
    }

    /// URLs navigated to, in order
    #[must_use]
    pub fn visited_urls(&self) -> Vec<String> {
        self.lock().visited.clone()
    }

    /// Screenshot paths captured, in order
    #[must_use]
    pub fn screenshot_paths(&self) -> Vec<std::path::PathBuf> {
        self.lock().screenshots.clone()
    }

    /// Whether [`BrowserSession::close`] has been called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// How many visibility checks the session has served
    #[must_use]
    pub fn visibility_checks(&self) -> usize {
        self.lock().visibility_checks
    }

    /// Make a text visible mid-test, as if the page changed on its own
    pub fn reveal_text(&self, text: impl Into<String>) {
        self.lock().visible_texts.insert(text.into());
    }

    /// Record a network response mid-test
    pub fn push_response(&self, response: CapturedResponse) {
        self.lock().responses_seen.push(response);
    }
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn goto(&self, url: &str) -> DonarResult<()> {
        let mut state = self.lock();
        if let Some(message) = &state.fail_navigation {
            return Err(DonarError::Navigation {
                url: url.to_string(),
                message: message.clone(),
            });
        }
        state.visited.push(url.to_string());
        state.current_url = url.to_string();
        Ok(())
    }

    async fn click(&self, query: &ElementQuery) -> DonarResult<()> {
        let key = query.key();
        let mut state = self.lock();
        state.check_known(&key)?;
        state.clicked.push(key.clone());
        state.apply_effect(&key);
        Ok(())
    }

    async fn fill(&self, query: &ElementQuery, value: &str) -> DonarResult<()> {
        let key = query.key();
        let mut state = self.lock();
        state.check_known(&key)?;
        state.filled.insert(key.clone(), value.to_string());
        state.input_values.insert(key, value.to_string());
        Ok(())
    }

    async fn is_visible(&self, query: &ElementQuery) -> DonarResult<bool> {
        let mut state = self.lock();
        state.visibility_checks += 1;
        let visible = match query {
            ElementQuery::Text(text) => state.text_visible(text),
            other => {
                let key = other.key();
                !state.strict || state.known.contains(&key)
            }
        };
        Ok(visible)
    }

    async fn text_content(&self, query: &ElementQuery) -> DonarResult<String> {
        let key = query.key();
        let state = self.lock();
        if let Some(text) = state.texts.get(&key) {
            return Ok(text.clone());
        }
        if let ElementQuery::Text(text) = query {
            if state.text_visible(text) {
                return Ok(text.clone());
            }
        }
        Err(DonarError::ElementNotFound { query: key })
    }

    async fn input_value(&self, query: &ElementQuery) -> DonarResult<String> {
        let key = query.key();
        let state = self.lock();
        state
            .input_values
            .get(&key)
            .cloned()
            .ok_or(DonarError::ElementNotFound { query: key })
    }

    async fn wait_for_visible(&self, query: &ElementQuery, wait: WaitOptions) -> DonarResult<()> {
        let deadline = Instant::now() + wait.timeout();
        loop {
            if self.is_visible(query).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DonarError::Timeout {
                    operation: format!("visibility of {}", query.key()),
                    ms: wait.timeout_ms,
                });
            }
            tokio::time::sleep(wait.poll_interval()).await;
        }
    }

    async fn wait_for_response(
        &self,
        pattern: &ResponsePattern,
        wait: WaitOptions,
    ) -> DonarResult<CapturedResponse> {
        let deadline = Instant::now() + wait.timeout();
        loop {
            {
                let state = self.lock();
                if let Some(hit) = state
                    .responses_seen
                    .iter()
                    .find(|r| pattern.matches(&r.url, r.method))
                {
                    return Ok(hit.clone());
                }
            }
            if Instant::now() >= deadline {
                return Err(DonarError::Timeout {
                    operation: format!("response matching '{}'", pattern.url_contains),
                    ms: wait.timeout_ms,
                });
            }
            tokio::time::sleep(wait.poll_interval()).await;
        }
    }

    async fn screenshot(&self, path: &Path, _full_page: bool) -> DonarResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // PNG signature only; enough to assert the file landed where expected.
        tokio::fs::write(path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).await?;
        self.lock().screenshots.push(path.to_path_buf());
        Ok(())
    }

    async fn title(&self) -> DonarResult<String> {
        Ok(self.lock().title.clone())
    }

    fn url(&self) -> String {
        self.lock().current_url.clone()
    }

    async fn close(&self) -> DonarResult<()> {
        self.lock().closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpMethod;
    use std::time::Duration;

    fn css(s: &str) -> ElementQuery {
        ElementQuery::Css(s.to_string())
    }

    fn fast_wait() -> WaitOptions {
        WaitOptions::new().with_timeout(1_000).with_poll_interval(10)
    }

    #[tokio::test]
    async fn test_lenient_records_everything() {
        let session = MockSession::builder().build();
        session.click(&css("#continue")).await.unwrap();
        session.fill(&css("#amount"), "20").await.unwrap();

        assert_eq!(session.clicked_keys(), vec!["css=#continue".to_string()]);
        assert_eq!(
            session.filled_values().get("css=#amount"),
            Some(&"20".to_string())
        );
    }

    #[tokio::test]
    async fn test_strict_rejects_unknown_elements() {
        let session = MockSession::builder()
            .strict()
            .with_element("css=#known")
            .build();

        session.click(&css("#known")).await.unwrap();
        let err = session.click(&css("#unknown")).await.unwrap_err();
        assert!(matches!(err, DonarError::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_click_reveals_text() {
        let session = MockSession::builder()
            .on_click_reveal("css=#save", "Success! New employee added")
            .build();

        let banner = ElementQuery::Text("Success! New employee added".to_string());
        assert!(!session.is_visible(&banner).await.unwrap());

        session.click(&css("#save")).await.unwrap();
        assert!(session.is_visible(&banner).await.unwrap());
    }

    #[tokio::test]
    async fn test_fill_updates_input_value() {
        let session = MockSession::builder().build();
        session.fill(&css("#email"), "ada@example.org").await.unwrap();
        assert_eq!(
            session.input_value(&css("#email")).await.unwrap(),
            "ada@example.org"
        );
    }

    #[tokio::test]
    async fn test_failed_navigation() {
        let session = MockSession::builder()
            .fail_navigation("net::ERR_CONNECTION_REFUSED")
            .build();
        let err = session.goto("https://example.org").await.unwrap_err();
        assert!(matches!(err, DonarError::Navigation { .. }));
        assert!(session.visited_urls().is_empty());
    }

    #[tokio::test]
    async fn test_wait_for_response_sees_click_effect() {
        let response = CapturedResponse::json(
            "https://example.org/api/transaction",
            HttpMethod::Post,
            &serde_json::json!({ "id": "txn-1" }),
        )
        .unwrap();
        let session = MockSession::builder()
            .on_click_respond("css=#pay", response)
            .build();

        let pattern = ResponsePattern::url("/transaction").with_method(HttpMethod::Post);
        let pay = css("#pay");
        let (waited, clicked) = tokio::join!(
            session.wait_for_response(&pattern, fast_wait()),
            session.click(&pay),
        );
        clicked.unwrap();
        assert_eq!(waited.unwrap().json_str_field("id").unwrap(), "txn-1");
    }

    #[tokio::test]
    async fn test_wait_for_response_times_out() {
        let session = MockSession::builder().build();
        let pattern = ResponsePattern::url("/never");
        let err = session
            .wait_for_response(&pattern, WaitOptions::new().with_timeout(120).with_poll_interval(10))
            .await
            .unwrap_err();
        assert!(matches!(err, DonarError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_wait_polls_at_the_configured_interval() {
        // One check up front, one after the oversized interval; the default
        // 50ms interval would check four or more times before the deadline.
        let session = MockSession::builder().strict().build();
        let missing = ElementQuery::Text("Never shown".to_string());
        let wait = WaitOptions::new().with_timeout(150).with_poll_interval(1_000);

        let err = session.wait_for_visible(&missing, wait).await.unwrap_err();
        assert!(matches!(err, DonarError::Timeout { .. }));
        assert_eq!(session.visibility_checks(), 2);
    }

    #[tokio::test]
    async fn test_wait_for_visible_picks_up_late_reveal() {
        let session = MockSession::builder().strict().build();
        let banner = ElementQuery::Text("Thanks for your donation".to_string());

        let waiter = session.clone();
        let handle = tokio::spawn(async move {
            waiter.wait_for_visible(&banner, fast_wait()).await
        });
        tokio::time::sleep(Duration::from_millis(80)).await;
        session.reveal_text("Thanks for your donation");
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_screenshot_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screenshot").join("step-1.png");
        let session = MockSession::builder().build();

        session.screenshot(&path, true).await.unwrap();
        assert!(path.exists());
        assert_eq!(session.screenshot_paths(), vec![path]);
    }

    #[tokio::test]
    async fn test_close_is_recorded() {
        let session = MockSession::builder().build();
        assert!(!session.is_closed());
        session.close().await.unwrap();
        assert!(session.is_closed());
    }
}
