//! Authenticated HTTP access.
//!
//! This module provides the `ApiClient`, which attaches the stored bearer
//! token to outgoing requests and turns a missing token or a 401 response
//! into a login redirect. Login itself posts an OAuth2 password form and
//! stores the returned token.

pub mod client;
pub mod options;

pub use client::{ApiClient, FetchOutcome, RedirectReason};
pub use options::RequestOptions;
