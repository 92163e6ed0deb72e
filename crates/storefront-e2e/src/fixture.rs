//! Per-test fixtures.
//!
//! Every test gets a fresh [`Session`] from a [`DriverFactory`] and one of
//! each page and component object bound to it. The session is closed on every
//! exit path of the test body: success, error, timeout and panic.
//!
//! ## Example
//!
//! ```ignore
//! let runner = FixtureRunner::new(MockStorefrontFactory::new(), SuiteConfig::default());
//! runner
//!     .run("standard user reaches inventory", |fx| async move {
//!         fx.login_page.goto().await?;
//!         fx.login_page.login_as(UserRole::Standard).await?;
//!         expect(&fx.inventory_page.products_grid()).to_be_visible().await
//!     })
//!     .await?;
//! ```

use crate::components::NavigationBar;
use crate::config::SuiteConfig;
use crate::driver::DriverFactory;
use crate::pages::{
    CartPage, CheckoutCompletePage, CheckoutInfoPage, CheckoutOverviewPage, InventoryPage,
    LoginPage, ProductDetailPage,
};
use crate::result::{E2eError, E2eResult};
use crate::session::Session;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{info, warn};

/// Page and component objects bound to one session
#[derive(Debug, Clone)]
pub struct Fixtures {
    /// The session everything below is bound to
    pub session: Session,
    /// Login screen
    pub login_page: LoginPage,
    /// Product listing
    pub inventory_page: InventoryPage,
    /// Product detail view
    pub product_detail_page: ProductDetailPage,
    /// Cart
    pub cart_page: CartPage,
    /// Checkout information step
    pub checkout_info_page: CheckoutInfoPage,
    /// Checkout overview step
    pub checkout_overview_page: CheckoutOverviewPage,
    /// Order confirmation
    pub checkout_complete_page: CheckoutCompletePage,
    /// Header
    pub nav_bar: NavigationBar,
}

impl Fixtures {
    /// Bind every object to `session`. Makes no browser calls.
    #[must_use]
    pub fn bind(session: &Session) -> Self {
        Self {
            session: session.clone(),
            login_page: LoginPage::new(session),
            inventory_page: InventoryPage::new(session),
            product_detail_page: ProductDetailPage::new(session),
            cart_page: CartPage::new(session),
            checkout_info_page: CheckoutInfoPage::new(session),
            checkout_overview_page: CheckoutOverviewPage::new(session),
            checkout_complete_page: CheckoutCompletePage::new(session),
            nav_bar: NavigationBar::new(session),
        }
    }
}

/// Lifecycle state of one test's fixtures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureState {
    /// Test registered, session not yet created
    Registered,
    /// Session created and fixtures bound
    SetUp,
    /// Session closed
    TornDown,
    /// Session could not be created or closed
    Failed,
}

/// Outcome of one [`FixtureRunner::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRecord {
    /// Test name
    pub name: String,
    /// Final fixture state
    pub state: FixtureState,
}

/// Runs test bodies with fresh fixtures and guaranteed teardown
#[derive(Debug)]
pub struct FixtureRunner<F> {
    factory: F,
    config: Arc<SuiteConfig>,
    history: Mutex<Vec<FixtureRecord>>,
}

impl<F: DriverFactory> FixtureRunner<F> {
    /// Create a runner that launches sessions through `factory`
    #[must_use]
    pub fn new(factory: F, config: SuiteConfig) -> Self {
        Self {
            factory,
            config: Arc::new(config),
            history: Mutex::new(Vec::new()),
        }
    }

    /// The driver factory
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// The configuration every session receives
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Every run so far, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<FixtureRecord> {
        self.lock_history().clone()
    }

    fn lock_history(&self) -> MutexGuard<'_, Vec<FixtureRecord>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, name: &str) -> usize {
        let mut history = self.lock_history();
        history.push(FixtureRecord {
            name: name.to_string(),
            state: FixtureState::Registered,
        });
        history.len() - 1
    }

    fn update(&self, index: usize, state: FixtureState) {
        if let Some(record) = self.lock_history().get_mut(index) {
            record.state = state;
        }
    }

    /// Run `body` with fresh fixtures.
    ///
    /// The body is bounded by the configured test timeout. The session is
    /// closed afterwards whatever happened; a panic in the body is resumed
    /// once teardown is done.
    ///
    /// # Errors
    ///
    /// - the body's own error
    /// - [`E2eError::TestTimeout`] if the body overran
    /// - the factory's error if no session could be created
    /// - [`E2eError::Fixture`] if the body passed but teardown failed
    pub async fn run<T, B, Fut>(&self, name: &str, body: B) -> E2eResult<T>
    where
        B: FnOnce(Fixtures) -> Fut,
        Fut: Future<Output = E2eResult<T>>,
    {
        let index = self.begin(name);
        let driver = match self.factory.create().await {
            Ok(driver) => driver,
            Err(err) => {
                warn!(test = name, %err, "fixture setup failed");
                self.update(index, FixtureState::Failed);
                return Err(err);
            }
        };
        let session = Session::new(driver, Arc::clone(&self.config));
        self.update(index, FixtureState::SetUp);
        info!(test = name, session = %session.id(), "test started");

        let started = Instant::now();
        let limit = self.config.timeouts.test();
        let fixtures = Fixtures::bind(&session);
        // The closure itself may panic before handing back a future.
        let outcome =
            AssertUnwindSafe(async move { tokio::time::timeout(limit, body(fixtures)).await })
                .catch_unwind()
                .await;

        let teardown = session.close().await;
        match &teardown {
            Ok(()) => self.update(index, FixtureState::TornDown),
            Err(err) => {
                warn!(test = name, %err, "fixture teardown failed");
                self.update(index, FixtureState::Failed);
            }
        }
        info!(test = name, elapsed_ms = started.elapsed().as_millis(), "test finished");

        match outcome {
            Err(panic) => std::panic::resume_unwind(panic),
            Ok(Err(_elapsed)) => Err(E2eError::TestTimeout {
                name: name.to_string(),
                ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            }),
            Ok(Ok(Err(err))) => Err(err),
            Ok(Ok(Ok(value))) => teardown.map(|()| value).map_err(|err| E2eError::Fixture {
                message: format!("teardown of {name:?} failed: {err}"),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Timeouts;
    use crate::mock::MockStorefrontFactory;
    use crate::pages::PageObject;
    use std::time::Duration;

    fn runner() -> FixtureRunner<MockStorefrontFactory> {
        FixtureRunner::new(MockStorefrontFactory::new(), SuiteConfig::default())
    }

    mod bind_tests {
        use super::*;
        use crate::driver::DriverFactory;

        #[tokio::test]
        async fn test_bind_makes_no_driver_calls() {
            let factory = MockStorefrontFactory::new();
            let driver = factory.create().await.unwrap();
            let session = Session::new(driver, Arc::new(SuiteConfig::default()));
            let fixtures = Fixtures::bind(&session);
            assert_eq!(fixtures.login_page.session(), &session);
            assert!(factory.storefronts()[0].call_history().is_empty());
        }
    }

    mod run_tests {
        use super::*;

        #[tokio::test]
        async fn test_success_closes_session() {
            let runner = runner();
            let value = runner
                .run("passes", |fx| async move {
                    fx.login_page.goto().await?;
                    Ok(42)
                })
                .await
                .unwrap();
            assert_eq!(value, 42);
            assert_eq!(runner.factory().closed(), 1);
            assert_eq!(runner.history()[0].state, FixtureState::TornDown);
        }

        #[tokio::test]
        async fn test_error_closes_session() {
            let runner = runner();
            let err = runner
                .run("fails", |_fx| async move {
                    Err::<(), _>(E2eError::AssertionFailed {
                        message: "boom".into(),
                    })
                })
                .await
                .unwrap_err();
            assert!(matches!(err, E2eError::AssertionFailed { .. }));
            assert_eq!(runner.factory().closed(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_timeout_closes_session() {
            let config = SuiteConfig::default().with_timeouts(Timeouts {
                test_ms: 1_000,
                ..Timeouts::default()
            });
            let runner = FixtureRunner::new(MockStorefrontFactory::new(), config);
            let err = runner
                .run("hangs", |_fx| async move {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                })
                .await
                .unwrap_err();
            assert!(matches!(err, E2eError::TestTimeout { ms: 1_000, .. }));
            assert_eq!(runner.factory().closed(), 1);
        }

        #[tokio::test]
        async fn test_panic_closes_session_then_resumes() {
            let runner = runner();
            let caught = AssertUnwindSafe(runner.run("panics", |_fx| async move {
                if true {
                    panic!("assertion inside test body");
                }
                Ok(())
            }))
            .catch_unwind()
            .await;
            assert!(caught.is_err());
            assert_eq!(runner.factory().closed(), 1);
            assert_eq!(runner.history()[0].state, FixtureState::TornDown);
        }

        #[tokio::test]
        async fn test_launch_failure_is_reported() {
            let runner = FixtureRunner::new(MockStorefrontFactory::failing(), SuiteConfig::default());
            let err = runner
                .run("no browser", |_fx| async move { Ok(()) })
                .await
                .unwrap_err();
            assert!(matches!(err, E2eError::BrowserLaunch { .. }));
            assert_eq!(runner.history()[0].state, FixtureState::Failed);
        }

        #[tokio::test]
        async fn test_each_run_gets_a_fresh_session() {
            let runner = runner();
            let first = runner.run("a", |fx| async move { Ok(fx.session.id()) }).await.unwrap();
            let second = runner.run("b", |fx| async move { Ok(fx.session.id()) }).await.unwrap();
            assert_ne!(first, second);
            assert_eq!(runner.factory().created(), 2);
            assert_eq!(runner.history().len(), 2);
        }
    }
}
