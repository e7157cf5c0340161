use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

use crate::error::GuardError;

/// Caller-supplied request options, merged over the defaults by
/// `ApiClient::authenticated_fetch`.
///
/// Top-level fields replace the defaults when set. Headers are merged key by
/// key: a caller header replaces only the default of the same name.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, GuardError> {
        Ok(self.body(serde_json::to_vec(value)?))
    }

    pub(crate) fn method_or_default(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    /// Default headers for `token` with the caller's headers merged on top.
    pub(crate) fn merged_headers(&self, token: &str) -> Result<HeaderMap, GuardError> {
        let mut merged = default_headers(token)?;

        let mut caller = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GuardError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| GuardError::InvalidHeader(format!("{}: {}", name, e)))?;
            caller.append(name, value);
        }

        // Replaces every value of each key present in `caller`, keeps the rest
        merged.extend(caller);
        Ok(merged)
    }
}

fn default_headers(token: &str) -> Result<HeaderMap, GuardError> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| GuardError::InvalidHeader(format!("authorization: {}", e)))?;
    headers.insert(header::AUTHORIZATION, bearer);
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_only() {
        let headers = RequestOptions::new().merged_headers("abc").unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_caller_headers_extend_defaults() {
        let headers = RequestOptions::new()
            .header("X-Trace", "1")
            .merged_headers("abc")
            .unwrap();
        assert_eq!(headers["x-trace"], "1");
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_caller_header_overrides_same_key_only() {
        let headers = RequestOptions::new()
            .header("content-type", "text/plain")
            .merged_headers("abc")
            .unwrap();
        assert_eq!(headers.get_all(header::CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain");
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc");

        let headers = RequestOptions::new()
            .header("Authorization", "Basic xyz")
            .merged_headers("abc")
            .unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Basic xyz");
    }

    #[test]
    fn test_repeated_caller_header_keeps_all_values() {
        let headers = RequestOptions::new()
            .header("Accept", "application/json")
            .header("Accept", "text/html")
            .merged_headers("abc")
            .unwrap();
        assert_eq!(headers.get_all(header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn test_invalid_header_rejected() {
        let err = RequestOptions::new()
            .header("bad header", "1")
            .merged_headers("abc")
            .unwrap_err();
        assert!(matches!(err, GuardError::InvalidHeader(_)));

        let err = RequestOptions::new().merged_headers("abc\n").unwrap_err();
        assert!(matches!(err, GuardError::InvalidHeader(_)));
    }

    #[test]
    fn test_top_level_options() {
        let options = RequestOptions::new()
            .method(Method::POST)
            .json(&serde_json::json!({"title": "Faust"}))
            .unwrap();
        assert_eq!(options.method_or_default(), Method::POST);
        assert_eq!(options.body.as_deref(), Some(br#"{"title":"Faust"}"#.as_slice()));
        assert_eq!(RequestOptions::new().method_or_default(), Method::GET);
    }
}
