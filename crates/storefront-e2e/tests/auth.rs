//! Login and logout scenarios
//!
//! Every test runs through [`FixtureRunner`] against the in-memory storefront,
//! so each one starts logged out with an empty cart.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use regex::Regex;
use storefront_e2e::mock::MockStorefrontFactory;
use storefront_e2e::{
    expect, expect_page, E2eResult, FixtureRunner, Fixtures, PageObject, SuiteConfig, UserRole,
};

fn runner() -> FixtureRunner<MockStorefrontFactory> {
    FixtureRunner::new(MockStorefrontFactory::new(), SuiteConfig::default())
}

async fn attempt_login(fx: &Fixtures, username: &str, password: &str) -> E2eResult<String> {
    fx.login_page.goto().await?;
    fx.login_page.login(username, password).await?;
    fx.login_page.error_message().await
}

// ============================================================================
// Smoke
// ============================================================================

mod smoke {
    use super::*;

    #[tokio::test]
    async fn standard_user_reaches_inventory() {
        runner()
            .run("standard user reaches inventory", |fx| async move {
                fx.login_page.goto().await?;
                expect(&fx.login_page.logo()).to_have_text("Swag Labs").await?;
                fx.login_page.login_as(UserRole::Standard).await?;

                let inventory = Regex::new(r"/inventory\.html$").unwrap();
                expect_page(&fx.session).to_have_url_matching(&inventory).await?;
                expect(&fx.inventory_page.title()).to_have_text("Products").await?;
                expect(&fx.inventory_page.products_grid()).to_be_visible().await?;
                assert_eq!(fx.inventory_page.item_count().await?, 6);
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn login_form_is_ready() {
        runner()
            .run("login form is ready", |fx| async move {
                fx.login_page.goto().await?;
                assert!(fx.login_page.is_current().await?);
                expect(&fx.login_page.username_input()).to_be_visible().await?;
                expect(&fx.login_page.password_input()).to_be_visible().await?;
                expect(&fx.login_page.login_button()).to_be_visible().await?;
                assert!(!fx.login_page.is_error_visible().await?);
                Ok(())
            })
            .await
            .unwrap();
    }
}

// ============================================================================
// Negative
// ============================================================================

mod negative {
    use super::*;

    #[tokio::test]
    async fn locked_out_user_is_refused() {
        runner()
            .run("locked out user is refused", |fx| async move {
                fx.login_page.goto().await?;
                fx.login_page.login_as(UserRole::LockedOut).await?;
                assert_eq!(
                    fx.login_page.error_message().await?,
                    "Epic sadface: Sorry, this user has been locked out."
                );
                assert!(fx.login_page.is_current().await?);
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn wrong_password_is_refused() {
        runner()
            .run("wrong password", |fx| async move {
                let error = attempt_login(&fx, "standard_user", "wrong_password").await?;
                assert_eq!(
                    error,
                    "Epic sadface: Username and password do not match any user in this service"
                );
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_user_is_refused() {
        runner()
            .run("unknown user", |fx| async move {
                let error = attempt_login(&fx, "nobody", "secret_sauce").await?;
                assert!(error.contains("do not match any user"));
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_username_is_required() {
        runner()
            .run("empty username", |fx| async move {
                let error = attempt_login(&fx, "", "secret_sauce").await?;
                assert_eq!(error, "Epic sadface: Username is required");
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_password_is_required() {
        runner()
            .run("empty password", |fx| async move {
                let error = attempt_login(&fx, "standard_user", "").await?;
                assert_eq!(error, "Epic sadface: Password is required");
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn username_is_checked_before_password() {
        runner()
            .run("both fields empty", |fx| async move {
                let error = attempt_login(&fx, "", "").await?;
                assert_eq!(error, "Epic sadface: Username is required");
                Ok(())
            })
            .await
            .unwrap();
    }
}

// ============================================================================
// Regression
// ============================================================================

mod regression {
    use super::*;

    #[tokio::test]
    async fn logout_returns_to_login() {
        runner()
            .run("logout", |fx| async move {
                fx.login_page.goto().await?;
                fx.login_page.login_as(UserRole::Standard).await?;
                fx.inventory_page.logout().await?;

                assert!(fx.login_page.is_current().await?);
                expect(&fx.login_page.login_button()).to_be_visible().await?;
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn logged_out_user_cannot_reach_inventory() {
        runner()
            .run("no inventory after logout", |fx| async move {
                fx.login_page.goto().await?;
                fx.login_page.login_as(UserRole::Standard).await?;
                fx.inventory_page.logout().await?;
                fx.inventory_page.goto().await?;

                assert!(fx.login_page.is_current().await?);
                assert!(!fx.inventory_page.is_current().await?);
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn every_accepted_role_reaches_inventory() {
        for role in UserRole::ALL {
            if role == UserRole::LockedOut {
                continue;
            }
            runner()
                .run(&format!("{role:?} logs in"), |fx| async move {
                    fx.login_page.goto().await?;
                    fx.login_page.login_as(role).await?;
                    fx.inventory_page.wait_until_current().await?;
                    assert_eq!(fx.inventory_page.item_count().await?, 6);
                    Ok(())
                })
                .await
                .unwrap();
        }
    }
}

// ============================================================================
// Edge
// ============================================================================

mod edge {
    use super::*;

    #[tokio::test]
    async fn direct_inventory_url_redirects_to_login() {
        runner()
            .run("unauthenticated inventory", |fx| async move {
                fx.inventory_page.goto().await?;
                assert!(fx.login_page.is_current().await?);
                assert_eq!(
                    fx.login_page.error_message().await?,
                    "Epic sadface: You can only access '/inventory.html' when you are logged in."
                );
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn direct_checkout_url_redirects_to_login() {
        runner()
            .run("unauthenticated checkout", |fx| async move {
                fx.checkout_overview_page.goto().await?;
                assert!(fx.login_page.is_current().await?);
                expect(&fx.login_page.error())
                    .to_contain_text("'/checkout-step-two.html'")
                    .await?;
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cleared_cookies_log_the_user_out() {
        runner()
            .run("cleared cookies", |fx| async move {
                fx.login_page.goto().await?;
                fx.login_page.login_as(UserRole::Standard).await?;
                fx.session.clear_cookies().await?;
                fx.cart_page.goto().await?;

                assert!(fx.login_page.is_current().await?);
                assert!(fx.login_page.is_error_visible().await?);
                Ok(())
            })
            .await
            .unwrap();
    }
}
