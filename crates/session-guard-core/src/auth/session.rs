use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::GuardConfig;
use crate::error::GuardError;
use crate::page::Navigator;

use super::TokenStore;

/// Accessor for the stored session token plus the navigation it triggers.
///
/// Clone is cheap; the store, navigator and config are shared.
#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    config: Arc<GuardConfig>,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>, config: GuardConfig) -> Self {
        Self {
            store,
            navigator,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Read the current token. Always hits the store, so a logout made
    /// elsewhere is seen by the next call.
    pub fn token(&self) -> Result<Option<String>, GuardError> {
        Ok(self.store.get(&self.config.token_key)?)
    }

    pub fn store_token(&self, token: &str) -> Result<(), GuardError> {
        self.store.set(&self.config.token_key, token)?;
        debug!(key = %self.config.token_key, "Session token stored");
        Ok(())
    }

    /// When the token was written, if the store records it.
    pub fn token_stored_at(&self) -> Result<Option<DateTime<Utc>>, GuardError> {
        Ok(self.store.stored_at(&self.config.token_key)?)
    }

    /// True iff the token key is present, whatever its value.
    /// A store that cannot be read counts as unauthenticated.
    pub fn is_authenticated(&self) -> bool {
        match self.store.get(&self.config.token_key) {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read token store");
                false
            }
        }
    }

    /// Delete the token and navigate to the login page. The redirect happens
    /// even if the delete fails.
    pub fn logout(&self) {
        info!("Logging out");
        self.clear_token();
        self.redirect_to_login();
    }

    /// Session rejected by the server: drop the token and go to login.
    pub(crate) fn invalidate(&self) {
        info!("Session rejected by server, clearing token");
        self.clear_token();
        self.redirect_to_login();
    }

    pub(crate) fn redirect_to_login(&self) {
        debug!(path = %self.config.login_path, "Redirecting to login");
        self.navigator.redirect(&self.config.login_path);
    }

    fn clear_token(&self) {
        if let Err(e) = self.store.delete(&self.config.token_key) {
            warn!(error = %e, "Failed to delete session token");
        }
    }
}
