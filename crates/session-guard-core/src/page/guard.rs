use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::{SessionGuard, TokenStore};
use crate::config::GuardConfig;

use super::{Document, Navigator};

/// What the bootstrap did for this page load.
pub struct PageGuard {
    session: SessionGuard,
    logout_bound: bool,
    redirected: bool,
}

impl PageGuard {
    pub fn session(&self) -> &SessionGuard {
        &self.session
    }

    /// Whether a logout anchor was found and wired.
    pub fn logout_bound(&self) -> bool {
        self.logout_bound
    }

    /// Whether the page was left for the login page.
    pub fn redirected(&self) -> bool {
        self.redirected
    }
}

/// Run the page guard once for a freshly parsed page.
///
/// Wires the logout anchor (if any) to `SessionGuard::logout`, then sends
/// unauthenticated visitors of any non-login page to the login page. This is
/// a client-side convenience only; it does not gate requests made elsewhere.
pub fn init_session_guard<D: Document + ?Sized>(
    document: &mut D,
    navigator: Arc<dyn Navigator>,
    store: Arc<dyn TokenStore>,
    config: GuardConfig,
) -> PageGuard {
    let session = SessionGuard::new(store, navigator, config);

    let logout_session = session.clone();
    let logout_bound = document.bind_anchor_click(
        &session.config().logout_path,
        Box::new(move |event| {
            event.prevent_default();
            logout_session.logout();
        }),
    );
    debug!(logout_bound, "Logout control wired");

    let path = session.navigator().current_path();
    let mut redirected = false;
    if !session.config().is_login_page(&path) && !session.is_authenticated() {
        info!(path = %path, "Unauthenticated visit to protected page");
        session.redirect_to_login();
        redirected = true;
    }

    PageGuard {
        session,
        logout_bound,
        redirected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::config::LoginPageMatch;
    use crate::page::{RecordingNavigator, StaticDocument};

    fn run(
        path: &str,
        store: Arc<MemoryTokenStore>,
        config: GuardConfig,
        document: &mut StaticDocument,
    ) -> (PageGuard, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::new(path));
        let guard = init_session_guard(document, navigator.clone(), store, config);
        (guard, navigator)
    }

    #[test]
    fn test_unauthenticated_protected_page_redirects() {
        let mut doc = StaticDocument::new();
        let (guard, nav) = run("/books", Arc::new(MemoryTokenStore::new()), GuardConfig::default(), &mut doc);
        assert!(guard.redirected());
        assert!(!guard.logout_bound());
        assert_eq!(nav.redirects(), vec!["/login".to_string()]);
    }

    #[test]
    fn test_authenticated_page_stays() {
        let mut doc = StaticDocument::new();
        let store = Arc::new(MemoryTokenStore::with_entry("access_token", "abc"));
        let (guard, nav) = run("/books", store, GuardConfig::default(), &mut doc);
        assert!(!guard.redirected());
        assert!(nav.redirects().is_empty());
    }

    #[test]
    fn test_login_page_never_redirects() {
        for path in ["/login", "/login/reset"] {
            let mut doc = StaticDocument::new();
            let (guard, nav) = run(path, Arc::new(MemoryTokenStore::new()), GuardConfig::default(), &mut doc);
            assert!(!guard.redirected(), "{path}");
            assert!(nav.redirects().is_empty(), "{path}");
        }
    }

    #[test]
    fn test_segment_mode_guards_lookalike_paths() {
        let mut doc = StaticDocument::new();
        let (guard, _) = run("/not-login/x", Arc::new(MemoryTokenStore::new()), GuardConfig::default(), &mut doc);
        assert!(guard.redirected());
    }

    #[test]
    fn test_substring_mode_exempts_any_login_path() {
        let config = GuardConfig {
            login_page_match: LoginPageMatch::Substring,
            ..GuardConfig::default()
        };
        for path in ["/login", "/not-login/x", "/users/login-help"] {
            let mut doc = StaticDocument::new();
            let (guard, nav) = run(path, Arc::new(MemoryTokenStore::new()), config.clone(), &mut doc);
            assert!(!guard.redirected(), "{path}");
            assert!(nav.redirects().is_empty(), "{path}");
        }
    }

    #[test]
    fn test_logout_anchor_logs_out() {
        let store = Arc::new(MemoryTokenStore::with_entry("access_token", "abc"));
        let mut doc = StaticDocument::new().with_anchor("/books").with_anchor("/logout");
        let (guard, nav) = run("/books", store.clone(), GuardConfig::default(), &mut doc);
        assert!(guard.logout_bound());
        assert!(nav.redirects().is_empty());

        let event = doc.click("/logout").unwrap();
        assert!(event.default_prevented());
        assert_eq!(store.get("access_token").unwrap(), None);
        assert_eq!(nav.redirects(), vec!["/login".to_string()]);
        assert!(!guard.session().is_authenticated());
    }

    #[test]
    fn test_logout_anchor_wired_on_login_page() {
        let mut doc = StaticDocument::new().with_anchor("/logout");
        let (guard, _) = run("/login", Arc::new(MemoryTokenStore::new()), GuardConfig::default(), &mut doc);
        assert!(guard.logout_bound());
        assert!(!guard.redirected());
    }
}
