//! Property-based tests over whole shopping sessions

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use storefront_e2e::mock::storefront::CATALOG;
use storefront_e2e::mock::MockStorefrontFactory;
use storefront_e2e::{
    CheckoutInfo, E2eResult, FixtureRunner, Fixtures, Money, PageObject, SortOption, SuiteConfig,
    UserRole,
};

// ===== Helpers =====

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn runner() -> FixtureRunner<MockStorefrontFactory> {
    FixtureRunner::new(MockStorefrontFactory::new(), SuiteConfig::default())
}

async fn login(fx: &Fixtures) -> E2eResult<()> {
    fx.login_page.goto().await?;
    fx.login_page.login_as(UserRole::Standard).await?;
    fx.inventory_page.wait_until_current().await
}

// ===== Strategy definitions =====

fn product_names() -> Vec<&'static str> {
    CATALOG.iter().map(|product| product.name).collect()
}

/// Any subset of the catalog, in catalog order
fn basket_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(product_names(), 0..=CATALOG.len())
}

fn sort_strategy() -> impl Strategy<Value = SortOption> {
    proptest::sample::select(SortOption::ALL.to_vec())
}

// ===== Properties =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// The badge counts exactly the products added
    #[test]
    fn prop_badge_counts_basket(basket in basket_strategy()) {
        let expected = basket.len();
        let count = block_on(runner().run("badge counts basket", |fx| async move {
            login(&fx).await?;
            for name in &basket {
                fx.inventory_page.add_to_cart(name).await?;
            }
            fx.inventory_page.cart_count().await
        }))
        .unwrap();
        prop_assert_eq!(count as usize, expected);
    }

    /// The overview adds up for any basket
    #[test]
    fn prop_overview_arithmetic(basket in basket_strategy()) {
        let expected: Money = CATALOG
            .iter()
            .filter(|product| basket.contains(&product.name))
            .map(|product| Money::from_cents(product.cents))
            .sum();
        let summary = block_on(runner().run("overview arithmetic", |fx| async move {
            login(&fx).await?;
            for name in &basket {
                fx.inventory_page.add_to_cart(name).await?;
            }
            fx.inventory_page.go_to_cart().await?;
            fx.cart_page.proceed_to_checkout().await?;
            fx.checkout_info_page
                .fill(&CheckoutInfo::new("Grace", "Hopper", "10001"))
                .await?;
            fx.checkout_info_page.continue_checkout().await?;
            fx.checkout_overview_page.summary().await
        }))
        .unwrap();
        prop_assert_eq!(summary.subtotal, expected);
        prop_assert!(summary.is_price_calculation_correct());
    }

    /// Sorting always yields a monotonic listing of the whole catalog
    #[test]
    fn prop_sort_is_monotonic(option in sort_strategy()) {
        let (names, prices) = block_on(runner().run("sort is monotonic", |fx| async move {
            login(&fx).await?;
            fx.inventory_page.sort_by(option).await?;
            Ok((
                fx.inventory_page.all_product_names().await?,
                fx.inventory_page.all_product_prices().await?,
            ))
        }))
        .unwrap();
        prop_assert_eq!(names.len(), CATALOG.len());
        prop_assert!(option.is_monotonic(&names, &prices));
    }

    /// Removing any product from the cart page hides its row and shrinks the list by one
    #[test]
    fn prop_remove_shrinks_cart(
        basket in proptest::sample::subsequence(product_names(), 1..=CATALOG.len()),
        pick in any::<proptest::sample::Index>(),
    ) {
        let victim = basket[pick.index(basket.len())];
        let (before, after, still_visible) = block_on(runner().run("remove shrinks cart", |fx| async move {
            login(&fx).await?;
            for name in &basket {
                fx.inventory_page.add_to_cart(name).await?;
            }
            fx.inventory_page.go_to_cart().await?;
            let before = fx.cart_page.item_count().await?;
            fx.cart_page.remove_item(victim).await?;
            let after = fx.cart_page.item_count().await?;
            let still_visible = fx.cart_page.contains(victim).await?;
            Ok((before, after, still_visible))
        }))
        .unwrap();
        prop_assert_eq!(after, before - 1);
        prop_assert!(!still_visible);
    }
}
