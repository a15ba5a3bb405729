use std::sync::Arc;

use tracing::debug;

use crate::router::routes::RouteTable;
use crate::session::Session;
use crate::shell::{Navigator, Notifier, ProgressIndicator};

/// Outcome of one guarded transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The transition may proceed; `title` is the resolved page title.
    Proceed { title: String },
    /// The transition is replaced by a redirect to `target`.
    Redirect { target: String },
}

/// Gate run before every route transition.
///
/// This is the only access-control point on the client; views trust the
/// guard to have already run and perform no checks of their own. The guard
/// never errors; unauthorized transitions become redirects.
pub struct NavigationGuard {
    routes: RouteTable,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<dyn ProgressIndicator>,
    navigator: Arc<dyn Navigator>,
    product_title: String,
}

impl NavigationGuard {
    pub fn new(
        routes: RouteTable,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
        progress: Arc<dyn ProgressIndicator>,
        navigator: Arc<dyn Navigator>,
        product_title: impl Into<String>,
    ) -> Self {
        Self {
            routes,
            session,
            notifier,
            progress,
            navigator,
            product_title: product_title.into(),
        }
    }

    /// Decide what happens to a transition toward `to`.
    pub fn resolve(&self, to: &str) -> Navigation {
        self.progress.start();
        let navigation = self.decide(to);
        match &navigation {
            Navigation::Proceed { title } => debug!(to, title = %title, "transition allowed"),
            Navigation::Redirect { target } => debug!(to, target = %target, "transition redirected"),
        }
        self.progress.finish();
        navigation
    }

    fn decide(&self, to: &str) -> Navigation {
        let Some(resolved) = self.routes.resolve(to) else {
            return Navigation::Redirect {
                target: "/404".to_string(),
            };
        };

        if let Some(target) = resolved.redirect() {
            return Navigation::Redirect {
                target: target.to_string(),
            };
        }

        if resolved.requires_auth() {
            if !self.session.is_logged_in() {
                self.notifier.warning("Please log in first");
                return Navigation::Redirect {
                    target: "/login".to_string(),
                };
            }
            if let Some(required) = resolved.required_role() {
                if self.session.role() != Some(required) {
                    self.notifier.error("Permission denied");
                    return Navigation::Redirect {
                        target: "/403".to_string(),
                    };
                }
            }
        } else if self.session.is_logged_in() && (to == "/login" || to == "/register") {
            return Navigation::Redirect {
                target: self.session.default_route().to_string(),
            };
        }

        let title = match resolved.title() {
            Some(title) => format!("{title} - {}", self.product_title),
            None => self.product_title.clone(),
        };
        Navigation::Proceed { title }
    }

    /// Run the guard and apply the outcome through the navigator: redirects
    /// are pushed, allowed transitions set the page title.
    pub fn navigate(&self, to: &str) -> Navigation {
        let navigation = self.resolve(to);
        match &navigation {
            Navigation::Proceed { title } => self.navigator.set_title(title),
            Navigation::Redirect { target } => self.navigator.push(target),
        }
        navigation
    }
}
