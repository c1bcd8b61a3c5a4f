//! Browser session abstraction.
//!
//! The harness drives the browser only through the [`BrowserSession`] trait:
//! one live page/tab in one browser context, owned by the test context and
//! borrowed (via `Arc`) by every page object built for that test.
//!
//! With the `browser` feature enabled, [`cdp::CdpSession`] provides a real
//! implementation over the Chrome DevTools Protocol via chromiumoxide.
//! Without it, tests use [`crate::mock::MockSession`].

use std::path::Path;

use async_trait::async_trait;

use crate::locator::ElementQuery;
use crate::network::{CapturedResponse, ResponsePattern};
use crate::result::DonarResult;
use crate::wait::WaitOptions;

/// One live page in one browser context.
///
/// All operations suspend until the underlying browser acknowledges them;
/// none of them retries.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate to a URL. May fail; the swallow-or-propagate policy lives in
    /// [`crate::page::BasePage`], not here.
    async fn goto(&self, url: &str) -> DonarResult<()>;

    /// Click the element matching the query
    async fn click(&self, query: &ElementQuery) -> DonarResult<()>;

    /// Fill the element matching the query with a value
    async fn fill(&self, query: &ElementQuery, value: &str) -> DonarResult<()>;

    /// Whether an element matching the query is currently visible
    async fn is_visible(&self, query: &ElementQuery) -> DonarResult<bool>;

    /// Text content of the element matching the query
    async fn text_content(&self, query: &ElementQuery) -> DonarResult<String>;

    /// Current value of the input matching the query
    async fn input_value(&self, query: &ElementQuery) -> DonarResult<String>;

    /// Wait until an element matching the query is visible, polling at the
    /// configured interval
    async fn wait_for_visible(&self, query: &ElementQuery, wait: WaitOptions) -> DonarResult<()>;

    /// Wait for a response matching the pattern, polling at the configured
    /// interval
    async fn wait_for_response(
        &self,
        pattern: &ResponsePattern,
        wait: WaitOptions,
    ) -> DonarResult<CapturedResponse>;

    /// Capture a screenshot of the page to `path`
    async fn screenshot(&self, path: &Path, full_page: bool) -> DonarResult<()>;

    /// The page title
    async fn title(&self) -> DonarResult<String>;

    /// The current URL
    fn url(&self) -> String;

    /// Close the session, releasing the underlying page/tab
    async fn close(&self) -> DonarResult<()>;
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
pub mod cdp {
    //! CDP-backed session via chromiumoxide.

    use super::*;
    use crate::result::DonarError;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Mutex;
    use tokio::time::Instant;

    /// Fetch recorder installed after navigation so response waits can poll
    /// completed requests from page context.
    const RESPONSE_RECORDER_JS: &str = r"(() => {
        if (window.__donar_responses) { return; }
        const log = [];
        window.__donar_responses = log;
        const orig = window.fetch.bind(window);
        window.fetch = async (...args) => {
            const res = await orig(...args);
            try {
                const body = await res.clone().text();
                const method = (args[1] && args[1].method) || 'GET';
                log.push({ url: res.url, method, status: res.status, body });
            } catch (_) {}
            return res;
        };
    })()";

    /// Launch options for the CDP session
    #[derive(Debug, Clone)]
    pub struct SessionConfig {
        /// Run in headless mode
        pub headless: bool,
        /// Path to chromium binary (None = auto-detect)
        pub chromium_path: Option<String>,
        /// Sandbox mode (disable for containers)
        pub sandbox: bool,
    }

    impl Default for SessionConfig {
        fn default() -> Self {
            Self {
                headless: true,
                chromium_path: None,
                sandbox: true,
            }
        }
    }

    /// A [`BrowserSession`] backed by a real chromium instance
    pub struct CdpSession {
        browser: Arc<Mutex<CdpBrowser>>,
        page: Arc<Mutex<CdpPage>>,
        current_url: StdMutex<String>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl CdpSession {
        /// Launch a browser and open one page
        pub async fn launch(config: SessionConfig) -> DonarResult<Self> {
            let mut builder = CdpConfig::builder();
            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| DonarError::Session {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| DonarError::Session {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| DonarError::Session {
                    message: e.to_string(),
                })?;

            Ok(Self {
                browser: Arc::new(Mutex::new(browser)),
                page: Arc::new(Mutex::new(page)),
                current_url: StdMutex::new(String::from("about:blank")),
                handle,
            })
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> DonarResult<T> {
            let page = self.page.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| DonarError::Session {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| DonarError::Session {
                message: e.to_string(),
            })
        }
    }

    /// JS expression evaluating to the element for a query (or null)
    fn element_expr(query: &ElementQuery) -> String {
        match query {
            ElementQuery::Css(s) if s.starts_with('/') || s.starts_with('(') => format!(
                "document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
            ElementQuery::Css(s) => format!("document.querySelector({s:?})"),
            ElementQuery::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).find(el => el.children.length === 0 && el.textContent === {t:?})"
            ),
            ElementQuery::Label(l) => format!(
                "(() => {{ const lab = Array.from(document.querySelectorAll('label')).find(el => el.textContent.trim() === {l:?}); \
                 if (!lab) return null; \
                 return lab.htmlFor ? document.getElementById(lab.htmlFor) : lab.querySelector('input,select,textarea'); }})()"
            ),
            ElementQuery::Placeholder(p) => format!(
                "Array.from(document.querySelectorAll('input,textarea')).find(el => el.placeholder === {p:?})"
            ),
            ElementQuery::Title(t) => format!(
                "Array.from(document.querySelectorAll('[title]')).find(el => el.title === {t:?})"
            ),
            ElementQuery::AltText(a) => format!(
                "Array.from(document.querySelectorAll('img,area,input[type=image]')).find(el => el.alt === {a:?})"
            ),
        }
    }

    #[async_trait]
    impl BrowserSession for CdpSession {
        async fn goto(&self, url: &str) -> DonarResult<()> {
            {
                let page = self.page.lock().await;
                page.goto(url).await.map_err(|e| DonarError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                // Best effort; the page may legitimately forbid script injection.
                let _ = page.evaluate(RESPONSE_RECORDER_JS).await;
            }
            *self
                .current_url
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner) = url.to_string();
            Ok(())
        }

        async fn click(&self, query: &ElementQuery) -> DonarResult<()> {
            let expr = format!(
                "(el => {{ if (!el) return false; el.click(); return true; }})({})",
                element_expr(query)
            );
            let hit: bool = self.eval(expr).await?;
            if hit {
                Ok(())
            } else {
                Err(DonarError::ElementNotFound {
                    query: query.key(),
                })
            }
        }

        async fn fill(&self, query: &ElementQuery, value: &str) -> DonarResult<()> {
            let expr = format!(
                "(el => {{ if (!el) return false; el.focus(); el.value = {value:?}; \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); return true; }})({})",
                element_expr(query)
            );
            let hit: bool = self.eval(expr).await?;
            if hit {
                Ok(())
            } else {
                Err(DonarError::ElementNotFound {
                    query: query.key(),
                })
            }
        }

        async fn is_visible(&self, query: &ElementQuery) -> DonarResult<bool> {
            let expr = format!(
                "(el => !!el && (el.offsetParent !== null || el.getClientRects().length > 0))({})",
                element_expr(query)
            );
            self.eval(expr).await
        }

        async fn text_content(&self, query: &ElementQuery) -> DonarResult<String> {
            let expr = format!(
                "(el => el ? el.textContent : null)({})",
                element_expr(query)
            );
            let text: Option<String> = self.eval(expr).await?;
            text.ok_or_else(|| DonarError::ElementNotFound {
                query: query.key(),
            })
        }

        async fn input_value(&self, query: &ElementQuery) -> DonarResult<String> {
            let expr = format!("(el => el ? el.value : null)({})", element_expr(query));
            let value: Option<String> = self.eval(expr).await?;
            value.ok_or_else(|| DonarError::ElementNotFound {
                query: query.key(),
            })
        }

        async fn wait_for_visible(
            &self,
            query: &ElementQuery,
            wait: WaitOptions,
        ) -> DonarResult<()> {
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
            #[derive(serde::Deserialize)]
            struct Recorded {
                url: String,
                method: String,
                status: u16,
                body: String,
            }

            let deadline = Instant::now() + wait.timeout();
            loop {
                let entries: Vec<Recorded> = self
                    .eval("window.__donar_responses || []".to_string())
                    .await?;
                for entry in entries {
                    let method = match entry.method.as_str() {
                        "POST" => crate::network::HttpMethod::Post,
                        "PUT" => crate::network::HttpMethod::Put,
                        "DELETE" => crate::network::HttpMethod::Delete,
                        _ => crate::network::HttpMethod::Get,
                    };
                    if pattern.matches(&entry.url, method) {
                        return Ok(CapturedResponse {
                            url: entry.url,
                            method,
                            status: entry.status,
                            body: entry.body.into_bytes(),
                        });
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

        async fn screenshot(&self, path: &Path, full_page: bool) -> DonarResult<()> {
            let page = self.page.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .capture_beyond_viewport(full_page)
                .build();

            let screenshot = page
                .execute(params)
                .await
                .map_err(|e| DonarError::Screenshot {
                    message: e.to_string(),
                })?;

            use base64::Engine;
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| DonarError::Screenshot {
                    message: e.to_string(),
                })?;

            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, bytes).await?;
            Ok(())
        }

        async fn title(&self) -> DonarResult<String> {
            let page = self.page.lock().await;
            let title = page.get_title().await.map_err(|e| DonarError::Session {
                message: e.to_string(),
            })?;
            Ok(title.unwrap_or_default())
        }

        fn url(&self) -> String {
            self.current_url
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }

        async fn close(&self) -> DonarResult<()> {
            let mut browser = self.browser.lock().await;
            browser.close().await.map_err(|e| DonarError::Session {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }
}
