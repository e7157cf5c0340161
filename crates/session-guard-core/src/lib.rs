//! Session Guard core library.
//!
//! Client-side session gating for a web front-end:
//! - `auth`: token storage and the `SessionGuard` accessor (`is_authenticated`, `logout`)
//! - `api`: the authenticated request wrapper and login
//! - `page`: the page-guard bootstrap plus the navigation and document seams
//! - `forms`: generic form validation and data extraction
//!
//! Every environment dependency (storage, navigation, document) is injected,
//! so the whole flow runs without a browser.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod page;
pub mod utils;

pub use api::{ApiClient, FetchOutcome, RedirectReason, RequestOptions};
pub use auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, SessionGuard, TokenStore};
pub use config::{GuardConfig, LoginPageMatch};
pub use error::GuardError;
pub use forms::{get_form_data, validate_form, FieldRule, Form, FormData, FormFields, RuleSet, ValidationResult};
pub use page::{init_session_guard, ClickEvent, Document, Navigator, PageGuard, RecordingNavigator, StaticDocument};
