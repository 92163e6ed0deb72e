//! Chromium driver over the DevTools protocol.
//!
//! Each [`ChromiumDriver`] owns its own browser process, so sessions never
//! share cookies or storage. Selectors are compiled to JavaScript by
//! [`script`](super::script) and evaluated in the page.

use super::script::{self, ScriptAction};
use super::{Driver, DriverFactory, ElementState};
use crate::config::{BrowserSettings, SuiteConfig};
use crate::result::{E2eError, E2eResult};
use crate::selector::Selector;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::network::ClearBrowserCookiesParams;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const BACK_POLL: Duration = Duration::from_millis(50);

/// A live Chromium page driven over CDP
#[derive(Debug)]
pub struct ChromiumDriver {
    page: CdpPage,
    browser: Mutex<Option<CdpBrowser>>,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl ChromiumDriver {
    /// Launch a browser and open a blank page
    pub async fn launch(
        settings: &BrowserSettings,
        navigation_timeout: Duration,
    ) -> E2eResult<Self> {
        let mut builder = CdpConfig::builder().window_size(
            settings.viewport_width,
            settings.viewport_height,
        );
        if !settings.headless {
            builder = builder.with_head();
        }
        if !settings.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = settings.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder
            .build()
            .map_err(|message| E2eError::BrowserLaunch { message })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| E2eError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| E2eError::BrowserLaunch {
                message: e.to_string(),
            })?;

        info!(headless = settings.headless, "chromium launched");
        Ok(Self {
            page,
            browser: Mutex::new(Some(browser)),
            handler,
            navigation_timeout,
        })
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, expression: String) -> E2eResult<T> {
        let result = self
            .page
            .evaluate(expression)
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| E2eError::driver(e.to_string()))
    }

    async fn act(
        &self,
        selector: &Selector,
        index: usize,
        action: ScriptAction<'_>,
    ) -> E2eResult<()> {
        let status: String = self
            .eval(script::action_script(selector, index, &action))
            .await?;
        match status.as_str() {
            script::OK => Ok(()),
            script::DETACHED => Err(E2eError::ElementDetached {
                selector: selector.to_string(),
            }),
            other => Err(E2eError::driver(format!("{selector}: {other}"))),
        }
    }

    async fn url_now(&self) -> E2eResult<String> {
        self.page
            .url()
            .await
            .map_err(|e| E2eError::driver(e.to_string()))
            .map(Option::unwrap_or_default)
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> E2eResult<()> {
        debug!(url, "navigate");
        let goto = self.page.goto(url);
        match tokio::time::timeout(self.navigation_timeout, goto).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(E2eError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(E2eError::Navigation {
                url: url.to_string(),
                message: format!(
                    "no load within {}ms",
                    self.navigation_timeout.as_millis()
                ),
            }),
        }
    }

    async fn current_url(&self) -> E2eResult<String> {
        self.url_now().await
    }

    async fn go_back(&self) -> E2eResult<()> {
        let before = self.url_now().await?;
        let _: serde_json::Value = self
            .eval("(() => { history.back(); return null; })()".to_string())
            .await?;
        let deadline = tokio::time::Instant::now() + self.navigation_timeout;
        while tokio::time::Instant::now() < deadline {
            if self.url_now().await? != before {
                return Ok(());
            }
            tokio::time::sleep(BACK_POLL).await;
        }
        Err(E2eError::Navigation {
            url: before,
            message: format!(
                "history.back() did not change the URL within {}ms",
                self.navigation_timeout.as_millis()
            ),
        })
    }

    async fn probe(&self, selector: &Selector) -> E2eResult<Vec<ElementState>> {
        self.eval(script::probe_script(selector)).await
    }

    async fn click(&self, selector: &Selector, index: usize) -> E2eResult<()> {
        self.act(selector, index, ScriptAction::Click).await
    }

    async fn fill(&self, selector: &Selector, index: usize, text: &str) -> E2eResult<()> {
        self.act(selector, index, ScriptAction::Fill(text)).await
    }

    async fn select_option(
        &self,
        selector: &Selector,
        index: usize,
        value: &str,
    ) -> E2eResult<()> {
        self.act(selector, index, ScriptAction::Select(value)).await
    }

    async fn clear_cookies(&self) -> E2eResult<()> {
        self.page
            .execute(ClearBrowserCookiesParams::default())
            .await
            .map_err(|e| E2eError::driver(e.to_string()))?;
        let _: serde_json::Value = self
            .eval(
                "(() => { try { localStorage.clear(); sessionStorage.clear(); } catch (e) {} return null; })()"
                    .to_string(),
            )
            .await?;
        Ok(())
    }

    async fn close(&self) -> E2eResult<()> {
        let browser = self.browser.lock().await.take();
        let result = match browser {
            Some(mut browser) => browser
                .close()
                .await
                .map(|_| ())
                .map_err(|e| E2eError::driver(e.to_string())),
            None => Ok(()),
        };
        self.handler.abort();
        result
    }
}

/// Launches one browser per session
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    settings: BrowserSettings,
    navigation_timeout: Duration,
}

impl ChromiumLauncher {
    /// Launcher using the browser settings and navigation bound of `config`
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self {
            settings: config.browser.clone(),
            navigation_timeout: config.timeouts.navigation(),
        }
    }
}

#[async_trait]
impl DriverFactory for ChromiumLauncher {
    async fn create(&self) -> E2eResult<Box<dyn Driver>> {
        let driver = ChromiumDriver::launch(&self.settings, self.navigation_timeout).await?;
        Ok(Box::new(driver))
    }
}
