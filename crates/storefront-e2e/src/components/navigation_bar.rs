//! Header shared by every logged-in screen: burger menu and cart icon.

use crate::locator::{Locator, WaitState};
use crate::result::{E2eError, E2eResult};
use crate::session::Session;
use tracing::debug;

/// Burger button that opens the side menu
pub const MENU_BUTTON_CSS: &str = "#react-burger-menu-btn";
/// Cross button that closes the side menu
pub const CLOSE_MENU_BUTTON_CSS: &str = "#react-burger-cross-btn";
/// Cart icon
pub const CART_LINK_CSS: &str = ".shopping_cart_link";
/// Item count badge on the cart icon, absent when the cart is empty
pub const CART_BADGE_CSS: &str = ".shopping_cart_badge";
/// "All Items" menu link
pub const ALL_ITEMS_LINK_CSS: &str = "#inventory_sidebar_link";
/// "Logout" menu link
pub const LOGOUT_LINK_CSS: &str = "#logout_sidebar_link";
/// "Reset App State" menu link
pub const RESET_LINK_CSS: &str = "#reset_sidebar_link";

/// The storefront header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationBar {
    session: Session,
}

impl NavigationBar {
    /// Header of `session`'s page
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
        }
    }

    /// Burger button
    #[must_use]
    pub fn menu_button(&self) -> Locator {
        self.session.locator(MENU_BUTTON_CSS)
    }

    /// Menu close button
    #[must_use]
    pub fn close_menu_button(&self) -> Locator {
        self.session.locator(CLOSE_MENU_BUTTON_CSS)
    }

    /// Cart icon
    #[must_use]
    pub fn cart_link(&self) -> Locator {
        self.session.locator(CART_LINK_CSS)
    }

    /// Cart badge
    #[must_use]
    pub fn cart_badge(&self) -> Locator {
        self.session.locator(CART_BADGE_CSS)
    }

    /// "All Items" link
    #[must_use]
    pub fn all_items_link(&self) -> Locator {
        self.session.locator(ALL_ITEMS_LINK_CSS)
    }

    /// "Logout" link
    #[must_use]
    pub fn logout_link(&self) -> Locator {
        self.session.locator(LOGOUT_LINK_CSS)
    }

    /// "Reset App State" link
    #[must_use]
    pub fn reset_link(&self) -> Locator {
        self.session.locator(RESET_LINK_CSS)
    }

    /// Open the side menu and wait until its links are showing
    pub async fn open_menu(&self) -> E2eResult<()> {
        debug!("open menu");
        self.menu_button().click().await?;
        self.logout_link().wait_for(WaitState::Visible).await
    }

    /// Close the side menu and wait until it is gone
    pub async fn close_menu(&self) -> E2eResult<()> {
        debug!("close menu");
        self.close_menu_button().click().await?;
        self.logout_link().wait_for(WaitState::Hidden).await
    }

    /// Open the cart
    pub async fn go_to_cart(&self) -> E2eResult<()> {
        self.cart_link().click().await
    }

    /// Return to the inventory through the menu
    pub async fn all_items(&self) -> E2eResult<()> {
        self.open_menu().await?;
        self.all_items_link().click().await
    }

    /// Log out through the menu
    pub async fn logout(&self) -> E2eResult<()> {
        self.open_menu().await?;
        self.logout_link().click().await
    }

    /// Empty the cart through the menu, then close the menu
    pub async fn reset_app_state(&self) -> E2eResult<()> {
        self.open_menu().await?;
        self.reset_link().click().await?;
        self.close_menu().await
    }

    /// Whether the badge is showing
    pub async fn is_cart_badge_visible(&self) -> E2eResult<bool> {
        self.cart_badge().is_visible().await
    }

    /// Number on the cart badge; an absent badge means zero.
    ///
    /// The storefront removes the badge instead of showing "0".
    /// Reads a single snapshot of the badge and never waits for it.
    pub async fn cart_count(&self) -> E2eResult<u32> {
        let badge = self
            .cart_badge()
            .probe()
            .await?
            .into_iter()
            .find(|element| element.visible);
        let Some(badge) = badge else {
            return Ok(0);
        };
        badge.text.trim().parse().map_err(|_| E2eError::Parse {
            expected: "cart count",
            text: badge.text,
        })
    }
}
