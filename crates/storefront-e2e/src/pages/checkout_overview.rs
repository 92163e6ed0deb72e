//! Checkout step two: order summary.
//!
//! The summary shows the item subtotal, tax and total as labelled amounts
//! (`Item total: $29.99`, `Tax: $2.40`, `Total: $32.39`). [`OrderSummary`]
//! reads them together with the per-item prices so the arithmetic can be
//! checked in one place.

use super::PageObject;
use crate::components::cart_item::CONTAINER_CSS as ROW_CSS;
use crate::components::{CartItem, ITEM_NAME_CSS, ITEM_PRICE_CSS};
use crate::locator::{Locator, WaitState};
use crate::money::Money;
use crate::result::E2eResult;
use crate::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const LIST_CSS: &str = ".cart_list";
const SUBTOTAL_CSS: &str = ".summary_subtotal_label";
const TAX_CSS: &str = ".summary_tax_label";
const TOTAL_CSS: &str = ".summary_total_label";
const FINISH_CSS: &str = "#finish";
const CANCEL_CSS: &str = "#cancel";

/// Amounts shown on the overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Price of each listed item, in display order
    pub item_prices: Vec<Money>,
    /// "Item total"
    pub subtotal: Money,
    /// "Tax"
    pub tax: Money,
    /// "Total"
    pub total: Money,
}

impl OrderSummary {
    /// Subtotal plus tax equals the total to the cent
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        (self.subtotal + self.tax).approx_eq(self.total)
    }

    /// Item prices add up to the subtotal and the total is consistent
    #[must_use]
    pub fn is_price_calculation_correct(&self) -> bool {
        let items: Money = self.item_prices.iter().copied().sum();
        items == self.subtotal && self.is_consistent()
    }
}

/// The overview at `/checkout-step-two.html`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOverviewPage {
    session: Session,
}

impl CheckoutOverviewPage {
    /// Bind to `session`
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
        }
    }

    /// Subtotal label
    #[must_use]
    pub fn subtotal_label(&self) -> Locator {
        self.session.locator(SUBTOTAL_CSS)
    }

    /// Tax label
    #[must_use]
    pub fn tax_label(&self) -> Locator {
        self.session.locator(TAX_CSS)
    }

    /// Total label
    #[must_use]
    pub fn total_label(&self) -> Locator {
        self.session.locator(TOTAL_CSS)
    }

    /// "Finish" button
    #[must_use]
    pub fn finish_button(&self) -> Locator {
        self.session.locator(FINISH_CSS)
    }

    /// Row of the product whose name contains `name`
    #[must_use]
    pub fn item(&self, name: &str) -> CartItem {
        CartItem::within(&self.session.locator(LIST_CSS), name)
    }

    fn rows(&self) -> Locator {
        self.session.locator(LIST_CSS).locator(ROW_CSS)
    }

    /// Subtotal text as displayed
    pub async fn subtotal_text(&self) -> E2eResult<String> {
        self.subtotal_label().inner_text().await
    }

    /// Tax text as displayed
    pub async fn tax_text(&self) -> E2eResult<String> {
        self.tax_label().inner_text().await
    }

    /// Total text as displayed
    pub async fn total_text(&self) -> E2eResult<String> {
        self.total_label().inner_text().await
    }

    /// Parsed subtotal
    pub async fn subtotal(&self) -> E2eResult<Money> {
        Money::parse(&self.subtotal_text().await?)
    }

    /// Parsed tax
    pub async fn tax(&self) -> E2eResult<Money> {
        Money::parse(&self.tax_text().await?)
    }

    /// Parsed total
    pub async fn total(&self) -> E2eResult<Money> {
        Money::parse(&self.total_text().await?)
    }

    /// Number of listed items
    pub async fn item_count(&self) -> E2eResult<usize> {
        self.session
            .locator(LIST_CSS)
            .wait_for(WaitState::Attached)
            .await?;
        self.rows().count().await
    }

    /// Names of the listed items
    pub async fn item_names(&self) -> E2eResult<Vec<String>> {
        self.rows().locator(ITEM_NAME_CSS).all_inner_texts().await
    }

    /// Read every amount on the page
    pub async fn summary(&self) -> E2eResult<OrderSummary> {
        let subtotal = self.subtotal().await?;
        let item_prices = self
            .rows()
            .locator(ITEM_PRICE_CSS)
            .all_inner_texts()
            .await?
            .iter()
            .map(|text| Money::parse(text))
            .collect::<E2eResult<Vec<_>>>()?;
        Ok(OrderSummary {
            item_prices,
            subtotal,
            tax: self.tax().await?,
            total: self.total().await?,
        })
    }

    /// Place the order
    pub async fn finish(&self) -> E2eResult<()> {
        self.finish_button().click().await
    }

    /// Abandon checkout; returns to the listing with the cart intact
    pub async fn cancel(&self) -> E2eResult<()> {
        self.session.locator(CANCEL_CSS).click().await
    }
}

#[async_trait]
impl PageObject for CheckoutOverviewPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url_pattern(&self) -> &str {
        "/checkout-step-two.html"
    }

    fn page_name(&self) -> &str {
        "checkout overview"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn summary(items: &[u64], subtotal: u64, tax: u64, total: u64) -> OrderSummary {
        OrderSummary {
            item_prices: items.iter().copied().map(Money::from_cents).collect(),
            subtotal: Money::from_cents(subtotal),
            tax: Money::from_cents(tax),
            total: Money::from_cents(total),
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn test_consistent_summary() {
            let summary = summary(&[2999, 999], 3998, 320, 4318);
            assert!(summary.is_consistent());
            assert!(summary.is_price_calculation_correct());
        }

        #[test]
        fn test_wrong_total_is_inconsistent() {
            assert!(!summary(&[2999], 2999, 240, 3249).is_consistent());
        }

        #[test]
        fn test_total_one_cent_high_is_inconsistent() {
            assert!(summary(&[5597], 5597, 448, 6045).is_price_calculation_correct());
            assert!(!summary(&[5597], 5597, 448, 6046).is_consistent());
            assert!(!summary(&[5597], 5597, 448, 6044).is_consistent());
        }

        #[test]
        fn test_items_must_add_up() {
            let summary = summary(&[2999], 3998, 320, 4318);
            assert!(summary.is_consistent());
            assert!(!summary.is_price_calculation_correct());
        }

        #[test]
        fn test_empty_order() {
            let summary = summary(&[], 0, 0, 0);
            assert!(summary.is_price_calculation_correct());
        }
    }

    mod page_tests {
        use super::*;
        use crate::config::{SuiteConfig, UserRole};
        use crate::mock::MockStorefront;
        use crate::pages::{CartPage, CheckoutInfo, CheckoutInfoPage, InventoryPage, LoginPage};
        use std::sync::Arc;

        async fn overview(products: &[&str]) -> CheckoutOverviewPage {
            let session = Session::new(
                Box::new(MockStorefront::new()),
                Arc::new(SuiteConfig::default()),
            );
            let login = LoginPage::new(&session);
            login.goto().await.unwrap();
            login.login_as(UserRole::Standard).await.unwrap();
            let inventory = InventoryPage::new(&session);
            for product in products {
                inventory.add_to_cart(product).await.unwrap();
            }
            inventory.go_to_cart().await.unwrap();
            CartPage::new(&session).proceed_to_checkout().await.unwrap();
            let info = CheckoutInfoPage::new(&session);
            info.fill(&CheckoutInfo::new("John", "Doe", "12345")).await.unwrap();
            info.continue_checkout().await.unwrap();
            CheckoutOverviewPage::new(&session)
        }

        #[tokio::test]
        async fn test_reads_amounts() {
            let page = overview(&["Sauce Labs Backpack"]).await;
            assert!(page.is_current().await.unwrap());
            assert_eq!(page.subtotal_text().await.unwrap(), "Item total: $29.99");
            assert_eq!(page.subtotal().await.unwrap(), Money::from_cents(2999));
            assert_eq!(page.tax().await.unwrap(), Money::from_cents(240));
            assert_eq!(page.total().await.unwrap(), Money::from_cents(3239));
            assert_eq!(page.item_count().await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_summary_is_correct_for_several_items() {
            let page = overview(&["Sauce Labs Backpack", "Sauce Labs Bike Light", "Sauce Labs Onesie"]).await;
            let summary = page.summary().await.unwrap();
            assert_eq!(summary.item_prices.len(), 3);
            assert!(summary.is_price_calculation_correct());
        }

        #[tokio::test]
        async fn test_overview_rows_have_no_remove_button() {
            let page = overview(&["Sauce Labs Onesie"]).await;
            let row = page.item("Sauce Labs Onesie");
            assert_eq!(row.quantity().await.unwrap(), 1);
            assert!(!row.is_remove_button_visible().await.unwrap());
        }

        #[tokio::test]
        async fn test_cancel_keeps_cart() {
            let page = overview(&["Sauce Labs Onesie"]).await;
            page.cancel().await.unwrap();
            let inventory = InventoryPage::new(page.session());
            assert!(inventory.is_current().await.unwrap());
            assert_eq!(inventory.cart_count().await.unwrap(), 1);
        }
    }
}
