//! Response matching for explicit network waits.
//!
//! Flows that need to observe a backend call (e.g. the payment submission)
//! describe the response they are waiting for with a [`ResponsePattern`] and
//! receive a [`CapturedResponse`] once the session sees a match.

use serde::{Deserialize, Serialize};

use crate::result::{DonarError, DonarResult};

/// HTTP methods for response matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// PUT request
    Put,
    /// DELETE request
    Delete,
    /// Any method
    Any,
}

impl HttpMethod {
    /// Convert to the wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Any => "*",
        }
    }

    /// Check if this method matches another
    #[must_use]
    pub fn matches(&self, other: Self) -> bool {
        *self == Self::Any || other == Self::Any || *self == other
    }
}

/// Predicate over responses observed by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePattern {
    /// Substring the response URL must contain
    pub url_contains: String,
    /// Method the originating request must have used
    pub method: HttpMethod,
}

impl ResponsePattern {
    /// Match any response whose URL contains `fragment`
    #[must_use]
    pub fn url(fragment: impl Into<String>) -> Self {
        Self {
            url_contains: fragment.into(),
            method: HttpMethod::Any,
        }
    }

    /// Restrict the pattern to a request method
    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Check a response against this pattern
    #[must_use]
    pub fn matches(&self, url: &str, method: HttpMethod) -> bool {
        url.contains(&self.url_contains) && self.method.matches(method)
    }
}

/// A response captured by an explicit wait
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedResponse {
    /// Response URL
    pub url: String,
    /// Request method
    pub method: HttpMethod,
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl CapturedResponse {
    /// A 200 response with a JSON body
    pub fn json<T: Serialize>(url: impl Into<String>, method: HttpMethod, data: &T) -> DonarResult<Self> {
        Ok(Self {
            url: url.into(),
            method,
            status: 200,
            body: serde_json::to_vec(data)?,
        })
    }

    /// Parse the body as JSON
    pub fn body_json(&self) -> DonarResult<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Extract a top-level string field from a JSON body.
    ///
    /// # Errors
    ///
    /// Fails with an assertion error if the field is absent or not a string.
    pub fn json_str_field(&self, field: &str) -> DonarResult<String> {
        let value = self.body_json()?;
        value
            .get(field)
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| DonarError::Assertion {
                message: format!("response body has no string field '{field}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod method_tests {
        use super::*;

        #[test]
        fn test_exact_match() {
            assert!(HttpMethod::Post.matches(HttpMethod::Post));
            assert!(!HttpMethod::Post.matches(HttpMethod::Get));
        }

        #[test]
        fn test_any_matches_everything() {
            assert!(HttpMethod::Any.matches(HttpMethod::Delete));
            assert!(HttpMethod::Put.matches(HttpMethod::Any));
        }
    }

    mod pattern_tests {
        use super::*;

        #[test]
        fn test_url_substring() {
            let pattern = ResponsePattern::url("/transaction");
            assert!(pattern.matches("https://example.org/api/transaction", HttpMethod::Post));
            assert!(!pattern.matches("https://example.org/api/donation", HttpMethod::Post));
        }

        #[test]
        fn test_method_restriction() {
            let pattern = ResponsePattern::url("/transaction").with_method(HttpMethod::Post);
            assert!(pattern.matches("/transaction", HttpMethod::Post));
            assert!(!pattern.matches("/transaction", HttpMethod::Get));
        }
    }

    mod response_tests {
        use super::*;

        #[test]
        fn test_json_field_extraction() {
            let response = CapturedResponse::json(
                "/transaction",
                HttpMethod::Post,
                &serde_json::json!({ "id": "txn-42" }),
            )
            .unwrap();
            assert_eq!(response.json_str_field("id").unwrap(), "txn-42");
        }

        #[test]
        fn test_missing_field_fails() {
            let response = CapturedResponse::json(
                "/transaction",
                HttpMethod::Post,
                &serde_json::json!({ "status": "ok" }),
            )
            .unwrap();
            assert!(matches!(
                response.json_str_field("id"),
                Err(DonarError::Assertion { .. })
            ));
        }
    }
}
