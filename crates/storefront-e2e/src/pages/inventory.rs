//! Product listing.
//!
//! The inventory grid shows every product as a [`ProductCard`]. Sorting goes
//! through a `<select>` whose raw option values are modelled by the closed
//! [`SortOption`] enum; raw strings are validated before the page is touched.
//!
//! The storefront does not remember the sort order: leaving the listing
//! (for a detail view, say) and coming back resets it to
//! [`SortOption::NameAscending`].

use super::PageObject;
use crate::components::{NavigationBar, ProductCard, ITEM_NAME_CSS, ITEM_PRICE_CSS};
use crate::locator::{Locator, WaitState};
use crate::money::Money;
use crate::result::{E2eError, E2eResult};
use crate::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const GRID_CSS: &str = ".inventory_list";
const ITEM_CSS: &str = ".inventory_item";
const SORT_CSS: &str = ".product_sort_container";
const TITLE_CSS: &str = ".title";

/// Orderings offered by the sort dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    /// Name (A to Z), `az`
    #[default]
    NameAscending,
    /// Name (Z to A), `za`
    NameDescending,
    /// Price (low to high), `lohi`
    PriceAscending,
    /// Price (high to low), `hilo`
    PriceDescending,
}

impl SortOption {
    /// Every option, in dropdown order
    pub const ALL: [Self; 4] = [
        Self::NameAscending,
        Self::NameDescending,
        Self::PriceAscending,
        Self::PriceDescending,
    ];

    /// Raw option value
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::NameAscending => "az",
            Self::NameDescending => "za",
            Self::PriceAscending => "lohi",
            Self::PriceDescending => "hilo",
        }
    }

    /// Option label as displayed
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAscending => "Name (A to Z)",
            Self::NameDescending => "Name (Z to A)",
            Self::PriceAscending => "Price (low to high)",
            Self::PriceDescending => "Price (high to low)",
        }
    }

    /// Whether this option orders by price (otherwise by name)
    #[must_use]
    pub const fn is_by_price(self) -> bool {
        matches!(self, Self::PriceAscending | Self::PriceDescending)
    }

    /// Whether the listing is ordered the way this option promises.
    ///
    /// Name orders look at `names`, price orders at `prices`; ties are
    /// allowed in both.
    #[must_use]
    pub fn is_monotonic(self, names: &[String], prices: &[Money]) -> bool {
        match self {
            Self::NameAscending => names.windows(2).all(|w| w[0] <= w[1]),
            Self::NameDescending => names.windows(2).all(|w| w[0] >= w[1]),
            Self::PriceAscending => prices.windows(2).all(|w| w[0] <= w[1]),
            Self::PriceDescending => prices.windows(2).all(|w| w[0] >= w[1]),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for SortOption {
    type Err = E2eError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.value() == value)
            .ok_or_else(|| E2eError::InvalidSortOption {
                value: value.to_string(),
            })
    }
}

/// The listing at `/inventory.html`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryPage {
    session: Session,
    nav_bar: NavigationBar,
}

impl InventoryPage {
    /// Bind to `session`
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            nav_bar: NavigationBar::new(session),
        }
    }

    /// The header
    #[must_use]
    pub const fn nav_bar(&self) -> &NavigationBar {
        &self.nav_bar
    }

    /// Product grid
    #[must_use]
    pub fn products_grid(&self) -> Locator {
        self.session.locator(GRID_CSS)
    }

    /// Sort dropdown
    #[must_use]
    pub fn sort_dropdown(&self) -> Locator {
        self.session.locator(SORT_CSS)
    }

    /// Screen title
    #[must_use]
    pub fn title(&self) -> Locator {
        self.session.locator(TITLE_CSS)
    }

    /// Card of the product whose name contains `name`
    #[must_use]
    pub fn product(&self, name: &str) -> ProductCard {
        ProductCard::within(&self.products_grid(), name)
    }

    async fn wait_for_grid(&self) -> E2eResult<()> {
        self.products_grid().wait_for(WaitState::Visible).await
    }

    /// Choose a sort order
    pub async fn sort_by(&self, option: SortOption) -> E2eResult<()> {
        debug!(sort = %option, "sort");
        self.sort_dropdown().select_option(option.value()).await
    }

    /// Choose a sort order by raw option value.
    ///
    /// # Errors
    ///
    /// [`E2eError::InvalidSortOption`] for an unknown value, before any
    /// browser interaction.
    pub async fn sort_by_value(&self, value: &str) -> E2eResult<()> {
        let option: SortOption = value.parse()?;
        self.sort_by(option).await
    }

    /// Sort order the dropdown currently shows
    pub async fn selected_sort(&self) -> E2eResult<SortOption> {
        self.sort_dropdown().input_value().await?.parse()
    }

    /// Every product name, in display order
    pub async fn all_product_names(&self) -> E2eResult<Vec<String>> {
        self.wait_for_grid().await?;
        self.products_grid()
            .locator(ITEM_NAME_CSS)
            .all_inner_texts()
            .await
    }

    /// Every product price, in display order.
    ///
    /// # Errors
    ///
    /// [`E2eError::Parse`] if any price text is malformed.
    pub async fn all_product_prices(&self) -> E2eResult<Vec<Money>> {
        self.wait_for_grid().await?;
        self.products_grid()
            .locator(ITEM_PRICE_CSS)
            .all_inner_texts()
            .await?
            .iter()
            .map(|text| Money::parse(text))
            .collect()
    }

    /// Name of the first product shown
    pub async fn first_product_name(&self) -> E2eResult<String> {
        self.wait_for_grid().await?;
        self.products_grid()
            .locator(ITEM_NAME_CSS)
            .first()
            .inner_text()
            .await
    }

    /// Number of products shown
    pub async fn item_count(&self) -> E2eResult<usize> {
        self.wait_for_grid().await?;
        self.products_grid().locator(ITEM_CSS).count().await
    }

    /// Put `name` in the cart
    pub async fn add_to_cart(&self, name: &str) -> E2eResult<()> {
        self.product(name).add_to_cart().await
    }

    /// Take `name` out of the cart
    pub async fn remove_from_cart(&self, name: &str) -> E2eResult<()> {
        self.product(name).remove_from_cart().await
    }

    /// Open the detail view of `name`
    pub async fn open_product(&self, name: &str) -> E2eResult<()> {
        self.product(name).open_details().await
    }

    /// Number on the cart badge, zero when absent
    pub async fn cart_count(&self) -> E2eResult<u32> {
        self.nav_bar.cart_count().await
    }

    /// Open the cart
    pub async fn go_to_cart(&self) -> E2eResult<()> {
        self.nav_bar.go_to_cart().await
    }

    /// Open the side menu
    pub async fn open_menu(&self) -> E2eResult<()> {
        self.nav_bar.open_menu().await
    }

    /// Close the side menu
    pub async fn close_menu(&self) -> E2eResult<()> {
        self.nav_bar.close_menu().await
    }

    /// Log out through the menu
    pub async fn logout(&self) -> E2eResult<()> {
        self.nav_bar.logout().await
    }

    /// Empty the cart through the menu
    pub async fn reset_app_state(&self) -> E2eResult<()> {
        self.nav_bar.reset_app_state().await
    }
}

#[async_trait]
impl PageObject for InventoryPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url_pattern(&self) -> &str {
        "/inventory.html"
    }

    fn page_name(&self) -> &str {
        "inventory"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{SuiteConfig, UserRole};
    use crate::mock::MockStorefront;
    use crate::pages::LoginPage;
    use proptest::prelude::*;
    use std::sync::Arc;

    async fn inventory() -> (InventoryPage, MockStorefront) {
        let mock = MockStorefront::new();
        let session = Session::new(Box::new(mock.clone()), Arc::new(SuiteConfig::default()));
        let login = LoginPage::new(&session);
        login.goto().await.unwrap();
        login.login_as(UserRole::Standard).await.unwrap();
        (InventoryPage::new(&session), mock)
    }

    mod sort_option_tests {
        use super::*;

        #[test]
        fn test_values_round_trip() {
            for option in SortOption::ALL {
                assert_eq!(option.value().parse::<SortOption>().unwrap(), option);
            }
        }

        #[test]
        fn test_unknown_value_rejected() {
            let err = "price".parse::<SortOption>().unwrap_err();
            assert!(matches!(err, E2eError::InvalidSortOption { value } if value == "price"));
        }

        #[test]
        fn test_monotonic_checks() {
            let names: Vec<String> = vec!["a".into(), "b".into(), "b".into()];
            let prices = [Money::from_cents(5), Money::from_cents(3)];
            assert!(SortOption::NameAscending.is_monotonic(&names, &prices));
            assert!(!SortOption::NameDescending.is_monotonic(&names, &prices));
            assert!(SortOption::PriceDescending.is_monotonic(&names, &prices));
            assert!(!SortOption::PriceAscending.is_monotonic(&names, &prices));
        }

        proptest! {
            #[test]
            fn prop_arbitrary_strings_parse_only_to_known_values(value in "[a-z]{0,6}") {
                match value.parse::<SortOption>() {
                    Ok(option) => prop_assert_eq!(option.value(), value.as_str()),
                    Err(E2eError::InvalidSortOption { value: rejected }) => {
                        prop_assert_eq!(rejected, value)
                    }
                    Err(other) => prop_assert!(false, "unexpected error {other}"),
                }
            }
        }
    }

    mod listing_tests {
        use super::*;

        #[tokio::test]
        async fn test_lists_six_products() {
            let (page, _) = inventory().await;
            assert!(page.is_current().await.unwrap());
            assert_eq!(page.item_count().await.unwrap(), 6);
            assert_eq!(page.all_product_names().await.unwrap().len(), 6);
            assert_eq!(page.first_product_name().await.unwrap(), "Sauce Labs Backpack");
            assert_eq!(page.title().inner_text().await.unwrap(), "Products");
        }

        #[tokio::test]
        async fn test_every_sort_option_is_monotonic() {
            let (page, _) = inventory().await;
            for option in SortOption::ALL {
                page.sort_by(option).await.unwrap();
                assert_eq!(page.selected_sort().await.unwrap(), option);
                let names = page.all_product_names().await.unwrap();
                let prices = page.all_product_prices().await.unwrap();
                assert!(option.is_monotonic(&names, &prices), "{option}: {names:?}");
            }
        }

        #[tokio::test]
        async fn test_invalid_value_touches_nothing() {
            let (page, mock) = inventory().await;
            let err = page.sort_by_value("newest").await.unwrap_err();
            assert!(matches!(err, E2eError::InvalidSortOption { .. }));
            assert!(!mock.was_called("select_option"));
        }

        #[tokio::test]
        async fn test_add_and_remove_by_name() {
            let (page, _) = inventory().await;
            page.add_to_cart("Sauce Labs Backpack").await.unwrap();
            assert_eq!(page.cart_count().await.unwrap(), 1);
            page.remove_from_cart("Sauce Labs Backpack").await.unwrap();
            assert_eq!(page.cart_count().await.unwrap(), 0);
        }
    }
}
