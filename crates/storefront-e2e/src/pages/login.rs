//! Login screen.

use super::PageObject;
use crate::config::UserRole;
use crate::locator::Locator;
use crate::result::E2eResult;
use crate::session::Session;
use async_trait::async_trait;
use tracing::info;

const USERNAME_PLACEHOLDER: &str = "Username";
const PASSWORD_PLACEHOLDER: &str = "Password";
const LOGIN_BUTTON_CSS: &str = "[data-test=\"login-button\"]";
const ERROR_CSS: &str = "[data-test=\"error\"]";
const LOGO_CSS: &str = ".login_logo";

/// The login screen at `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPage {
    session: Session,
}

impl LoginPage {
    /// Bind to `session`
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
        }
    }

    /// Username input
    #[must_use]
    pub fn username_input(&self) -> Locator {
        self.session.get_by_placeholder(USERNAME_PLACEHOLDER)
    }

    /// Password input
    #[must_use]
    pub fn password_input(&self) -> Locator {
        self.session.get_by_placeholder(PASSWORD_PLACEHOLDER)
    }

    /// Submit button
    #[must_use]
    pub fn login_button(&self) -> Locator {
        self.session.locator(LOGIN_BUTTON_CSS)
    }

    /// Validation error banner
    #[must_use]
    pub fn error(&self) -> Locator {
        self.session.locator(ERROR_CSS)
    }

    /// Application logo
    #[must_use]
    pub fn logo(&self) -> Locator {
        self.session.locator(LOGO_CSS)
    }

    /// Fill both fields and submit. Does not check the outcome.
    pub async fn login(&self, username: &str, password: &str) -> E2eResult<()> {
        info!(username, "login");
        self.username_input().fill(username).await?;
        self.password_input().fill(password).await?;
        self.login_button().click().await
    }

    /// Log in with the configured credentials of `role`
    pub async fn login_as(&self, role: UserRole) -> E2eResult<()> {
        let credentials = self.session.config().credentials(role);
        self.login(&credentials.username, &credentials.password)
            .await
    }

    /// Text of the error banner, waiting for it to appear
    pub async fn error_message(&self) -> E2eResult<String> {
        self.error().inner_text().await
    }

    /// Whether the error banner is showing right now
    pub async fn is_error_visible(&self) -> E2eResult<bool> {
        self.error().is_visible().await
    }
}

#[async_trait]
impl PageObject for LoginPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url_pattern(&self) -> &str {
        "/"
    }

    fn page_name(&self) -> &str {
        "login"
    }
}
