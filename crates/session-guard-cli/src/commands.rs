use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use regex::Regex;
use session_guard_core::utils::format_age;
use session_guard_core::{
    init_session_guard, validate_form, ApiClient, FetchOutcome, FieldRule, FormFields, GuardConfig, GuardError,
    Navigator, RecordingNavigator, RedirectReason, RequestOptions, RuleSet, SessionGuard, StaticDocument,
    TokenStore,
};
use tracing::debug;

/// Minimum password length accepted by the account service
const MIN_PASSWORD_LENGTH: usize = 8;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn open_session(store: Arc<dyn TokenStore>, config: GuardConfig) -> (SessionGuard, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new("/"));
    let session = SessionGuard::new(store, navigator.clone(), config);
    (session, navigator)
}

fn describe_token_age(stored_at: Option<DateTime<Utc>>) -> String {
    match stored_at {
        Some(at) => format_age(at, Utc::now()),
        None => "at an unknown time".to_string(),
    }
}

pub fn status(store: Arc<dyn TokenStore>, config: GuardConfig) -> Result<()> {
    let (session, _) = open_session(store, config);
    if session.is_authenticated() {
        let age = describe_token_age(session.token_stored_at()?);
        println!("Authenticated (token stored {})", age);
    } else {
        println!("Not authenticated");
    }
    Ok(())
}

pub async fn login(store: Arc<dyn TokenStore>, config: GuardConfig, username: &str) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let (session, _) = open_session(store, config);
    let client = ApiClient::new(session)?;
    client
        .login(username, &password)
        .await
        .context("Login failed")?;
    println!("Logged in as {}", username);
    Ok(())
}

pub fn logout(store: Arc<dyn TokenStore>, config: GuardConfig) {
    let (session, navigator) = open_session(store, config);
    session.logout();
    println!("Logged out, now at {}", navigator.current_path());
}

/// Fetch every URL concurrently and print each outcome. A failed request is
/// reported and the remaining outcomes are still printed; the command fails
/// afterwards if any request failed.
pub async fn get(store: Arc<dyn TokenStore>, config: GuardConfig, urls: &[String]) -> Result<()> {
    let (session, _) = open_session(store, config);
    let client = ApiClient::new(session)?;

    let requests = urls
        .iter()
        .map(|url| client.authenticated_fetch(url, RequestOptions::default()));
    let outcomes = join_all(requests).await;

    let mut failed = 0;
    for (url, outcome) in urls.iter().zip(outcomes) {
        if let Err(e) = print_outcome(url, outcome).await {
            eprintln!("{}: {:#}", url, e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} requests failed", failed, urls.len());
    }
    Ok(())
}

async fn print_outcome(url: &str, outcome: Result<FetchOutcome, GuardError>) -> Result<()> {
    match outcome.context("Request failed")? {
        FetchOutcome::Response(response) => {
            let status = response.status();
            let body = response.text().await.context("Failed to read response body")?;
            println!("{} {}", status, url);
            println!("{}", pretty_body(&body));
        }
        FetchOutcome::Redirected(RedirectReason::MissingToken) => {
            println!("{}: not logged in, run `session-guard login <username>`", url);
        }
        FetchOutcome::Redirected(RedirectReason::Unauthorized) => {
            println!("{}: session expired, token removed. Log in again.", url);
        }
    }
    Ok(())
}

/// Pretty-print JSON bodies; anything else is shown as received.
fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

pub fn visit(store: Arc<dyn TokenStore>, config: GuardConfig, path: &str) {
    let logout_path = config.logout_path.clone();
    let navigator = Arc::new(RecordingNavigator::new(path));
    let mut document = StaticDocument::new().with_anchor(logout_path);

    let guard = init_session_guard(&mut document, navigator.clone(), store, config);
    debug!(logout_bound = guard.logout_bound(), "Page guard ran");

    if guard.redirected() {
        println!("{}: redirected to {}", path, navigator.current_path());
    } else {
        println!("{}: access allowed", path);
    }
}

pub fn account_rules() -> Result<RuleSet> {
    let email = Regex::new(EMAIL_PATTERN).context("Invalid e-mail pattern")?;
    Ok(RuleSet::new()
        .field(
            "email",
            FieldRule::new("E-Mail")
                .required()
                .pattern(email)
                .message("Bitte eine gültige E-Mail-Adresse eingeben."),
        )
        .field(
            "password",
            FieldRule::new("Passwort").required().min_length(MIN_PASSWORD_LENGTH),
        ))
}

pub fn check_account(email: &str) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let form = FormFields::new().with("email", email).with("password", password);
    let result = validate_form(&form, &account_rules()?);
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
