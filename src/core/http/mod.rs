//! HTTP plumbing shared by the session service and the API clients
//!
//! Requests are plain data ([`ApiRequest`]) so the interceptor can inspect,
//! re-authorize and replay them. Transports turn them into real network
//! calls: `reqwest` on the server, `gloo-net` in the browser.

pub mod interceptor;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::error::SessionError;

pub use interceptor::AuthClient;
#[cfg(feature = "hydrate")]
pub use transport::FetchTransport;
#[cfg(feature = "ssr")]
pub use transport::ReqwestTransport;

/// HTTP methods used against the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Patch => write!(f, "PATCH"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// One field of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// An outgoing request, relative to the configured API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append query parameters
    pub fn with_query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, SessionError> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Set a `multipart/form-data` body
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Some(RequestBody::Multipart(parts));
        self
    }

    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    pub fn form_parts(&self) -> &[FormPart] {
        match &self.body {
            Some(RequestBody::Multipart(parts)) => parts,
            _ => &[],
        }
    }

    /// Value of a text field of a multipart body
    pub fn form_text(&self, name: &str) -> Option<&str> {
        self.form_parts().iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set or replace a header (names compare case-insensitively)
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Set or replace the `Authorization: Bearer` header
    pub fn bearer(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token))
    }

    /// Look up a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Join the request path onto a base URL
    pub fn url(&self, base: &str) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// A response as seen by the session layer
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SessionError> {
        serde_json::from_str(&self.body).map_err(|e| SessionError::Decode(e.to_string()))
    }

    /// Parse the backend error payload, if any
    pub fn error_body(&self) -> Option<ApiErrorBody> {
        serde_json::from_str(&self.body).ok()
    }

    /// Human-readable message from the backend error payload
    pub fn error_message(&self) -> Option<String> {
        self.error_body().and_then(|body| body.user_message())
    }
}

/// Error payload sent by the backend
///
/// `message` is either a single string or a list of validation messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<ErrorMessage>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

impl ApiErrorBody {
    /// Message suitable for display, falling back to the `error` field
    pub fn user_message(&self) -> Option<String> {
        let message = match &self.message {
            Some(ErrorMessage::Single(message)) => Some(message.clone()),
            Some(ErrorMessage::Many(messages)) if !messages.is_empty() => Some(messages.join("\n")),
            _ => None,
        };

        message
            .or_else(|| self.error.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Transport-level failure (no HTTP response was received)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends requests to the backend
///
/// Implementations only move bytes; status handling belongs to the session
/// layer and the interceptor.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_replaces_existing_header() {
        let request = ApiRequest::get("/resources")
            .bearer("first")
            .with_header("authorization", "Bearer second");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("Authorization"), Some("Bearer second"));
    }

    #[test]
    fn test_multipart_body_lookup() {
        let request = ApiRequest::post("/resources").multipart(vec![
            FormPart::text("name", "Salle Lumière"),
            FormPart::File {
                name: "mainImage".to_string(),
                file_name: "salle.png".to_string(),
                mime: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            },
        ]);

        assert_eq!(request.form_text("name"), Some("Salle Lumière"));
        assert_eq!(request.form_text("mainImage"), None);
        assert_eq!(request.form_parts()[1].name(), "mainImage");
        assert_eq!(request.json_body(), None);
    }

    #[test]
    fn test_url_joins_slashes() {
        let request = ApiRequest::get("/auth/refresh");
        assert_eq!(
            request.url("http://localhost:3000/"),
            "http://localhost:3000/auth/refresh"
        );
        assert_eq!(
            ApiRequest::get("resources").url("http://api"),
            "http://api/resources"
        );
    }

    #[test]
    fn test_error_body_single_message() {
        let response = ApiResponse::new(
            400,
            r#"{"statusCode":400,"message":"Ressource introuvable","error":"Bad Request"}"#,
        );

        assert_eq!(
            response.error_message(),
            Some("Ressource introuvable".to_string())
        );
    }

    #[test]
    fn test_error_body_message_list() {
        let response = ApiResponse::new(
            400,
            r#"{"statusCode":400,"message":["email must be an email","password too short"]}"#,
        );

        assert_eq!(
            response.error_message(),
            Some("email must be an email\npassword too short".to_string())
        );
    }

    #[test]
    fn test_error_body_falls_back_to_error_field() {
        let response = ApiResponse::new(403, r#"{"statusCode":403,"error":"Forbidden"}"#);
        assert_eq!(response.error_message(), Some("Forbidden".to_string()));
    }

    #[test]
    fn test_error_body_absent() {
        assert_eq!(ApiResponse::new(500, "").error_message(), None);
        assert_eq!(ApiResponse::new(500, "<html>").error_message(), None);
    }

    #[test]
    fn test_json_decode_failure() {
        let response = ApiResponse::new(200, "not json");
        let result: Result<serde_json::Value, _> = response.json();
        assert!(matches!(result, Err(SessionError::Decode(_))));
    }
}
