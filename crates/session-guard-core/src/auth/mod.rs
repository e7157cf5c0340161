//! Token storage and session state.
//!
//! This module provides:
//! - `TokenStore`: the injectable key-value store holding the bearer token
//! - `MemoryTokenStore`, `FileTokenStore`, `KeyringTokenStore`: store backends
//! - `SessionGuard`: the accessor answering "is the user authenticated?" and
//!   performing logout
//!
//! Presence of the token key is the only authentication signal; the value
//! is never inspected.

pub mod file_store;
pub mod keyring_store;
pub mod session;
pub mod store;

pub use file_store::FileTokenStore;
pub use keyring_store::KeyringTokenStore;
pub use session::SessionGuard;
pub use store::{MemoryTokenStore, TokenStore};
