//! Slow rendering, timeouts, session isolation and closed sessions

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;
use storefront_e2e::mock::MockStorefrontFactory;
use storefront_e2e::{
    expect, E2eError, FixtureRunner, PageObject, SuiteConfig, Timeouts, UserRole, WaitState,
};
use tokio::time::Instant;

fn runner() -> FixtureRunner<MockStorefrontFactory> {
    FixtureRunner::new(MockStorefrontFactory::new(), SuiteConfig::default())
}

mod edge {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn performance_glitch_user_is_waited_for() {
        let factory = MockStorefrontFactory::new().with_render_delay(Duration::from_millis(350));
        let runner = FixtureRunner::new(factory, SuiteConfig::default());
        runner
            .run("slow inventory", |fx| async move {
                fx.login_page.goto().await?;
                let started = Instant::now();
                fx.login_page.login_as(UserRole::PerformanceGlitch).await?;

                assert!(!fx.inventory_page.products_grid().is_visible().await?);
                assert_eq!(fx.inventory_page.item_count().await?, 6);
                assert!(started.elapsed() >= Duration::from_millis(350));
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn short_action_timeout_fails_on_slow_render() {
        let config = SuiteConfig::default().with_timeouts(Timeouts {
            action_ms: 100,
            ..Timeouts::default()
        });
        let factory = MockStorefrontFactory::new().with_render_delay(Duration::from_secs(2));
        let runner = FixtureRunner::new(factory, config);
        let err = runner
            .run("too slow", |fx| async move {
                fx.login_page.goto().await?;
                fx.login_page.login_as(UserRole::PerformanceGlitch).await?;
                fx.inventory_page.item_count().await
            })
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert!(matches!(err, E2eError::ActionabilityTimeout { ms: 100, .. }));
        assert_eq!(runner.factory().closed(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn assertion_timeout_reports_last_value() {
        let err = runner()
            .run("badge never appears", |fx| async move {
                fx.login_page.goto().await?;
                fx.login_page.login_as(UserRole::Standard).await?;
                expect(&fx.nav_bar.cart_badge())
                    .with_timeout(Duration::from_millis(200))
                    .to_have_text("1")
                    .await
            })
            .await
            .unwrap_err();
        assert!(matches!(err, E2eError::AssertionFailed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_for_an_element_that_never_attaches() {
        let err = runner()
            .run("missing element", |fx| async move {
                fx.login_page.goto().await?;
                fx.session
                    .locator("#does-not-exist")
                    .with_timeout(Duration::from_millis(250))
                    .wait_for(WaitState::Attached)
                    .await
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            E2eError::ActionabilityTimeout { ref target, ms: 250, .. } if target == "#does-not-exist"
        ));
    }

    #[tokio::test]
    async fn concurrent_sessions_share_nothing() {
        let runner = runner();
        let first = runner.run("first shopper", |fx| async move {
            fx.login_page.goto().await?;
            fx.login_page.login_as(UserRole::Standard).await?;
            fx.inventory_page.add_to_cart("Sauce Labs Backpack").await?;
            fx.inventory_page.add_to_cart("Sauce Labs Onesie").await?;
            fx.inventory_page.cart_count().await
        });
        let second = runner.run("second shopper", |fx| async move {
            fx.login_page.goto().await?;
            fx.login_page.login_as(UserRole::Visual).await?;
            fx.inventory_page.add_to_cart("Sauce Labs Bike Light").await?;
            fx.inventory_page.cart_count().await
        });

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first.unwrap(), 2);
        assert_eq!(second.unwrap(), 1);
        assert_eq!(runner.factory().created(), 2);
        assert_eq!(runner.factory().closed(), 2);
        let carts: Vec<usize> = runner
            .factory()
            .storefronts()
            .iter()
            .map(|storefront| storefront.cart_len())
            .collect();
        assert_eq!(carts.iter().sum::<usize>(), 3);
    }

    #[tokio::test]
    async fn closed_session_rejects_further_calls() {
        let runner = runner();
        let session = runner
            .run("leaks its session", |fx| async move {
                fx.login_page.goto().await?;
                Ok(fx.session.clone())
            })
            .await
            .unwrap();

        assert!(session.is_closed());
        let err = session.url().await.unwrap_err();
        assert!(matches!(err, E2eError::SessionClosed { .. }));
        let err = storefront_e2e::LoginPage::new(&session).goto().await.unwrap_err();
        assert!(matches!(err, E2eError::SessionClosed { .. }));
    }

    #[tokio::test]
    async fn unknown_path_is_not_any_page() {
        runner()
            .run("unknown path", |fx| async move {
                fx.login_page.goto().await?;
                fx.login_page.login_as(UserRole::Standard).await?;
                fx.session.goto("/no-such-page.html").await?;
                assert!(!fx.inventory_page.is_current().await?);
                assert!(!fx.login_page.is_current().await?);
                assert_eq!(fx.nav_bar.cart_link().count().await?, 0);
                Ok(())
            })
            .await
            .unwrap();
    }
}
