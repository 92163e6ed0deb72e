//! Component objects.
//!
//! A component object wraps one repeated widget (a product card, a cart row)
//! or one shared widget (the header) and exposes it in business terms. An
//! item component is identified by a scope locator and a discriminator text:
//! its container is every `CONTAINER_CSS` element under the scope whose text
//! contains the discriminator, exactly and case-sensitively.
//!
//! Components hold locators only. Nothing is resolved until a method is
//! awaited, and every method re-resolves, so a component built before a
//! re-render stays valid after it.

pub mod cart_item;
pub mod navigation_bar;
pub mod product_card;

pub use cart_item::CartItem;
pub use navigation_bar::NavigationBar;
pub use product_card::ProductCard;

use crate::locator::Locator;
use crate::money::Money;
use crate::result::E2eResult;
use crate::selector::AriaRole;
use async_trait::async_trait;

/// Item name inside a card or row
pub const ITEM_NAME_CSS: &str = ".inventory_item_name";
/// Item price inside a card or row
pub const ITEM_PRICE_CSS: &str = ".inventory_item_price";
/// Item description inside a card or row
pub const ITEM_DESCRIPTION_CSS: &str = ".inventory_item_desc";
/// Accessible label of the add button
pub const ADD_TO_CART_LABEL: &str = "add to cart";
/// Accessible label of the remove button
pub const REMOVE_LABEL: &str = "remove";

/// Container locator for the item under `scope` whose text contains
/// `discriminator`
pub(crate) fn scoped(scope: &Locator, container_css: &str, discriminator: &str) -> Locator {
    scope.locator(container_css).filter_has_text(discriminator)
}

/// Shared contract of repeated item widgets
#[async_trait]
pub trait ItemComponent: Send + Sync {
    /// Locator of the widget's container element
    fn container(&self) -> &Locator;

    /// Text that singles this item out among its siblings
    fn discriminator(&self) -> &str;

    /// Locator for `css` inside the container
    fn part(&self, css: &str) -> Locator {
        self.container().locator(css)
    }

    /// Button inside the container whose label contains `label`, ignoring case
    fn button(&self, label: &str) -> Locator {
        self.container().get_by_role(AriaRole::Button, Some(label))
    }

    /// Displayed item name
    async fn name(&self) -> E2eResult<String> {
        self.part(ITEM_NAME_CSS).inner_text().await
    }

    /// Displayed price.
    ///
    /// # Errors
    ///
    /// [`E2eError::Parse`](crate::E2eError::Parse) when the text is not a
    /// `$<int>.<2 digits>` amount.
    async fn price(&self) -> E2eResult<Money> {
        let text = self.part(ITEM_PRICE_CSS).inner_text().await?;
        Money::parse(&text)
    }

    /// Displayed description
    async fn description(&self) -> E2eResult<String> {
        self.part(ITEM_DESCRIPTION_CSS).inner_text().await
    }

    /// Whether the item is rendered right now; an absent item is not
    async fn is_visible(&self) -> E2eResult<bool> {
        self.container().is_visible().await
    }
}
