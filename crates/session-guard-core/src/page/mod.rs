//! Page-guard bootstrap and the browser seams it runs against.
//!
//! `Navigator` stands in for the window location, `Document` for the parsed
//! page. `init_session_guard` is the explicit once-per-page-load entry point.

pub mod document;
pub mod guard;
pub mod navigator;

pub use document::{ClickEvent, ClickHandler, Document, StaticDocument};
pub use guard::{init_session_guard, PageGuard};
pub use navigator::{Navigator, RecordingNavigator};
