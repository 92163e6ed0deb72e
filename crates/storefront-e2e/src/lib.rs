//! Storefront E2E: Page Objects and Fixtures for the Sauce Demo Storefront
//!
//! End-to-end tests for the Sauce Demo shop are written against business
//! operations (`login_as`, `add_to_cart`, `proceed_to_checkout`) rather than
//! selectors. Page objects wrap whole screens, component objects wrap the
//! repeated widgets inside them, and fixtures hand each test a fresh, isolated
//! browser session with every object already bound to it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  STOREFRONT-E2E Architecture                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Test Body  │    │ Page /     │    │ Locator    │            │
//! │   │ (Fixtures) │───►│ Component  │───►│ (waits,    │            │
//! │   │            │    │ Objects    │    │  strict)   │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │ Driver            │
//! │                          ┌──────────────────┴───────┐           │
//! │                          ▼                          ▼           │
//! │                   ┌────────────┐             ┌────────────┐     │
//! │                   │ Chromium   │             │ Mock       │     │
//! │                   │ (CDP)      │             │ Storefront │     │
//! │                   └────────────┘             └────────────┘     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use storefront_e2e::mock::MockStorefrontFactory;
//! use storefront_e2e::{expect, FixtureRunner, PageObject, SuiteConfig, UserRole};
//!
//! # tokio_test_block_on(async {
//! let runner = FixtureRunner::new(MockStorefrontFactory::new(), SuiteConfig::default());
//! runner
//!     .run("add backpack to cart", |fx| async move {
//!         fx.login_page.goto().await?;
//!         fx.login_page.login_as(UserRole::Standard).await?;
//!         fx.inventory_page.add_to_cart("Sauce Labs Backpack").await?;
//!         expect(&fx.nav_bar.cart_badge()).to_have_text("1").await
//!     })
//!     .await?;
//! # Ok::<(), storefront_e2e::E2eError>(())
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod components;
pub mod config;
pub mod driver;
mod expect;
pub mod fixture;
mod locator;
pub mod logging;
pub mod mock;
mod money;
pub mod pages;
mod result;
pub mod selector;
mod session;
pub mod wait;

pub use components::{CartItem, ItemComponent, NavigationBar, ProductCard};
pub use config::{Credentials, SuiteConfig, Timeouts, UserRole};
pub use driver::{Driver, DriverFactory, ElementState};
pub use expect::{expect, expect_page, ExpectAssertion, LocatorExpect, PageExpect};
pub use fixture::{FixtureRecord, FixtureRunner, FixtureState, Fixtures};
pub use locator::{Locator, LocatorOptions, WaitState};
pub use money::Money;
pub use pages::{
    CartPage, CheckoutCompletePage, CheckoutInfo, CheckoutInfoPage, CheckoutOverviewPage,
    InventoryPage, LoginPage, OrderSummary, PageObject, ProductDetailPage, SortOption,
};
pub use result::{E2eError, E2eResult};
pub use selector::{AriaRole, Selector};
pub use session::Session;

#[cfg(feature = "browser")]
pub use driver::{ChromiumDriver, ChromiumLauncher};
