//! Transport-neutral HTTP request and response values.

use std::fmt;

/// HTTP methods used against the Backlog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PATCH method
    Patch,
}

impl HttpMethod {
    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }

    /// Returns whether `status` counts as success for this method.
    ///
    /// POST accepts 200 and 201; every other method accepts only 200.
    #[must_use]
    pub const fn accepts(self, status: u16) -> bool {
        match self {
            Self::Post => matches!(status, 200 | 201),
            _ => status == 200,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An outgoing request. The body, if any, is form-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Extra headers, in order.
    pub headers: Vec<(String, String)>,
    /// Form fields sent as `application/x-www-form-urlencoded`.
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            form: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the form body.
    #[must_use]
    pub fn with_form(mut self, form: Vec<(String, String)>) -> Self {
        self.form = Some(form);
        self
    }

    /// Returns the first header with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response with its body fully read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers; names are lowercase.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with no headers.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header, lowercasing its name.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// Returns the first header with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        assert!(HttpMethod::Get.accepts(200));
        assert!(!HttpMethod::Get.accepts(201));
        assert!(HttpMethod::Post.accepts(200));
        assert!(HttpMethod::Post.accepts(201));
        assert!(!HttpMethod::Post.accepts(204));
        assert!(HttpMethod::Patch.accepts(200));
        assert!(!HttpMethod::Patch.accepts(201));
    }

    #[test]
    fn test_response_header_lookup() {
        let response = HttpResponse::new(401, "").with_header("WWW-Authenticate", "Bearer");
        assert_eq!(response.header("www-authenticate"), Some("Bearer"));
        assert_eq!(response.header("WWW-AUTHENTICATE"), Some("Bearer"));
        assert_eq!(response.header("content-type"), None);
    }

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::new(HttpMethod::Post, "https://foo.backlog.com/x")
            .with_header("Authorization", "Bearer t")
            .with_form(vec![("content".to_string(), "hi".to_string())]);
        assert_eq!(request.header("authorization"), Some("Bearer t"));
        assert_eq!(request.form.as_ref().map(Vec::len), Some(1));
    }
}
