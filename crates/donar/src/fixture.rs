//! Page-object fixtures.
//!
//! Each test gets a [`TestContext`] holding one shared browser session and a
//! [`FixtureRegistry`]. Page objects are built lazily on first request and
//! cached by type, so every component in a test observes the same page state.
//! [`TestContext::run`] owns teardown: the session is closed whether the test
//! body succeeds or fails.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::page::{BasePage, PageConfig};
use crate::report::{RunReport, RunStatus};
use crate::result::{DonarError, DonarResult};
use crate::scenario::Scenario;
use crate::session::BrowserSession;

/// A page object that can be attached to the shared page state
pub trait PageComponent: Sized + Send + Sync + 'static {
    /// Build the component over the shared base page
    fn attach(base: BasePage) -> Self;
}

enum FixtureEntry {
    /// `attach` is running; a second request for the same type mid-build is a
    /// dependency cycle.
    Building,
    Ready(Arc<dyn Any + Send + Sync>),
}

/// Lazy, per-test cache of page objects, keyed by type.
///
/// At most one instance of each component type exists per test; repeated
/// requests return the same `Arc`.
pub struct FixtureRegistry {
    base: BasePage,
    entries: Mutex<HashMap<TypeId, FixtureEntry>>,
}

impl FixtureRegistry {
    /// Create an empty registry over the shared base page
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self {
            base,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get or build the component of type `P`.
    ///
    /// # Errors
    ///
    /// Fails with a fixture error when `P` is requested again while its own
    /// `attach` is still running.
    pub fn get<P: PageComponent>(&self) -> DonarResult<Arc<P>> {
        let type_id = TypeId::of::<P>();
        let type_name = std::any::type_name::<P>();

        {
            let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            match entries.get(&type_id) {
                Some(FixtureEntry::Ready(any)) => {
                    let arc = Arc::clone(any)
                        .downcast::<P>()
                        .map_err(|_| DonarError::Fixture {
                            message: format!("fixture cache holds wrong type for {type_name}"),
                        })?;
                    return Ok(arc);
                }
                Some(FixtureEntry::Building) => {
                    return Err(DonarError::Fixture {
                        message: format!("fixture cycle detected while building {type_name}"),
                    });
                }
                None => {
                    entries.insert(type_id, FixtureEntry::Building);
                }
            }
        }

        debug!(fixture = type_name, "building page object");
        let component = Arc::new(P::attach(self.base.clone()));

        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(type_id, FixtureEntry::Ready(component.clone()));
        Ok(component)
    }

    /// Number of components built so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether no component has been built yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for FixtureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureRegistry")
            .field("built", &self.len())
            .finish_non_exhaustive()
    }
}

/// Everything one test needs: the scenario, the shared session, and fixtures
pub struct TestContext {
    scenario: Scenario,
    session: Arc<dyn BrowserSession>,
    registry: Arc<FixtureRegistry>,
}

impl TestContext {
    /// Build a context over a session
    #[must_use]
    pub fn new(scenario: Scenario, session: Arc<dyn BrowserSession>, config: PageConfig) -> Self {
        let base = BasePage::new(Arc::clone(&session), config);
        Self {
            scenario,
            session,
            registry: Arc::new(FixtureRegistry::new(base)),
        }
    }

    /// The scenario under test
    #[must_use]
    pub const fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// The shared session
    #[must_use]
    pub fn session(&self) -> Arc<dyn BrowserSession> {
        Arc::clone(&self.session)
    }

    /// Get or build the page object of type `P`
    pub fn fixture<P: PageComponent>(&self) -> DonarResult<Arc<P>> {
        self.registry.get::<P>()
    }

    /// Run a test body with teardown guaranteed.
    ///
    /// The session is closed after the body returns, on success and on error
    /// alike; a close failure only surfaces when the body itself succeeded.
    /// A scenario timeout bounds the body; expiry fails the test with
    /// `Timeout` and still tears the session down. When the config asks for
    /// reports, a [`RunReport`] is written under the results directory.
    pub async fn run<F, Fut, T>(
        scenario: Scenario,
        session: Arc<dyn BrowserSession>,
        config: PageConfig,
        body: F,
    ) -> DonarResult<T>
    where
        F: FnOnce(TestContext) -> Fut,
        Fut: Future<Output = DonarResult<T>>,
    {
        info!(test = %scenario.name, "starting test");
        let timeout_ms = scenario.timeout_ms;
        let results_dir = config.results_dir.clone();
        let write_reports = config.write_reports;
        let started = Instant::now();

        let context = Self::new(scenario.clone(), Arc::clone(&session), config);
        let fut = body(context);
        let outcome = match timeout_ms {
            Some(ms) => match tokio::time::timeout(Duration::from_millis(ms), fut).await {
                Ok(result) => result,
                Err(_) => Err(DonarError::Timeout {
                    operation: format!("test '{}'", scenario.name),
                    ms,
                }),
            },
            None => fut.await,
        };
        let closed = session.close().await;

        if write_reports {
            let duration_ms = started.elapsed().as_millis() as u64;
            let report = match &outcome {
                Ok(_) => RunReport::new(&scenario, RunStatus::Passed, duration_ms),
                Err(err) => RunReport::new(&scenario, RunStatus::Failed, duration_ms)
                    .with_error(err.to_string()),
            };
            if let Err(err) = report.save(&results_dir) {
                warn!(test = %scenario.name, error = %err, "failed to write run report");
            }
        }

        match outcome {
            Ok(value) => {
                closed?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("scenario", &self.scenario)
            .field("fixtures", &self.registry.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Strategy;
    use crate::mock::MockSession;

    struct LoginPage {
        base: BasePage,
    }

    impl PageComponent for LoginPage {
        fn attach(base: BasePage) -> Self {
            Self { base }
        }
    }

    struct EmployeePage {
        base: BasePage,
    }

    impl PageComponent for EmployeePage {
        fn attach(base: BasePage) -> Self {
            Self { base }
        }
    }

    fn registry_over(session: &MockSession) -> FixtureRegistry {
        let base = BasePage::new(Arc::new(session.clone()), PageConfig::default());
        FixtureRegistry::new(base)
    }

    #[test]
    fn test_same_type_yields_same_instance() {
        let session = MockSession::builder().build();
        let registry = registry_over(&session);

        let first = registry.get::<LoginPage>().unwrap();
        let second = registry.get::<LoginPage>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_types_are_distinct_entries() {
        let session = MockSession::builder().build();
        let registry = registry_over(&session);

        registry.get::<LoginPage>().unwrap();
        registry.get::<EmployeePage>().unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_fixtures_share_one_session() {
        let session = MockSession::builder().build();
        let registry = registry_over(&session);

        let login = registry.get::<LoginPage>().unwrap();
        let employee = registry.get::<EmployeePage>().unwrap();

        login.base.fill(Strategy::Id, "username", "admin").await.unwrap();
        let seen = employee
            .base
            .value_of(Strategy::Id, "username")
            .await
            .unwrap();
        assert_eq!(seen, "admin");
    }

    #[test]
    fn test_separate_tests_get_separate_registries() {
        let session_a = MockSession::builder().build();
        let session_b = MockSession::builder().build();
        let registry_a = registry_over(&session_a);
        let registry_b = registry_over(&session_b);

        let a = registry_a.get::<LoginPage>().unwrap();
        let b = registry_b.get::<LoginPage>().unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_run_closes_session_on_success() {
        let session = MockSession::builder().build();
        let result = TestContext::run(
            Scenario::new("closes-on-success"),
            Arc::new(session.clone()),
            PageConfig::default(),
            |ctx| async move {
                ctx.fixture::<LoginPage>()?;
                Ok(42)
            },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn test_run_closes_session_on_failure() {
        let session = MockSession::builder().build();
        let result: DonarResult<()> = TestContext::run(
            Scenario::new("closes-on-failure"),
            Arc::new(session.clone()),
            PageConfig::default(),
            |_ctx| async move {
                Err(DonarError::Assertion {
                    message: "forced failure".to_string(),
                })
            },
        )
        .await;

        assert!(matches!(result, Err(DonarError::Assertion { .. })));
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn test_run_enforces_scenario_timeout() {
        let session = MockSession::builder().build();
        let result: DonarResult<()> = TestContext::run(
            Scenario::new("slow-test").with_timeout(50),
            Arc::new(session.clone()),
            PageConfig::default(),
            |_ctx| async move {
                tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                Ok(())
            },
        )
        .await;

        assert!(matches!(result, Err(DonarError::Timeout { ms: 50, .. })));
        assert!(session.is_closed(), "teardown must run after a timeout");
    }

    #[tokio::test]
    async fn test_run_writes_report_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let session = MockSession::builder().build();
        let config = PageConfig::default()
            .with_results_dir(dir.path())
            .with_write_reports(true);

        let result: DonarResult<()> = TestContext::run(
            Scenario::regression("reported-failure"),
            Arc::new(session),
            config,
            |_ctx| async move {
                Err(DonarError::Assertion {
                    message: "banner missing".to_string(),
                })
            },
        )
        .await;
        assert!(result.is_err());

        let report = crate::report::RunReport::load(
            &dir.path().join("reports").join("reported-failure.json"),
        )
        .unwrap();
        assert_eq!(report.status, crate::report::RunStatus::Failed);
        assert!(report.error.unwrap().contains("banner missing"));
    }
}
