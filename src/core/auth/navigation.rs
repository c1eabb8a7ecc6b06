//! Navigation side effects of the session (logout redirect, OAuth entry)

/// Performs navigations requested by the session service
pub trait Navigator: Send + Sync {
    /// Go to an application route
    fn navigate(&self, path: &str);

    /// Leave the application for an absolute URL (OAuth providers)
    fn redirect_external(&self, url: &str);
}

/// Navigator for contexts without a browser, e.g. server-side rendering
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!("Navigation to {} ignored outside the browser", path);
    }

    fn redirect_external(&self, url: &str) {
        tracing::debug!("External redirect to {} ignored outside the browser", url);
    }
}

/// Navigator driving `window.location`
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

#[cfg(feature = "hydrate")]
impl BrowserNavigator {
    fn assign(target: &str) {
        let Some(window) = web_sys::window() else {
            tracing::warn!("No window available, cannot navigate to {}", target);
            return;
        };
        if let Err(e) = window.location().set_href(target) {
            tracing::error!("Navigation to {} failed: {:?}", target, e);
        }
    }
}

#[cfg(feature = "hydrate")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        Self::assign(path);
    }

    fn redirect_external(&self, url: &str) {
        Self::assign(url);
    }
}
