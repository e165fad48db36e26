//! HTTP plumbing shared by the Infoblox and Device42 clients.
//!
//! - [`Transport`] - the seam both clients send requests through
//! - [`RestClient`] - reqwest-backed transport with a lazy session

mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use session::{is_connection_reset, RestClient};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        };
        write!(f, "{name}")
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

/// One request against a remote API. `path` is relative to the client's host.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Sent form-encoded when not empty.
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(path: &str, query: Vec<(String, String)>) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            path: path.to_string(),
            query,
            form: vec![],
        }
    }

    pub fn post_form(path: &str, form: Vec<(String, String)>) -> ApiRequest {
        ApiRequest {
            method: Method::Post,
            path: path.to_string(),
            query: vec![],
            form,
        }
    }

    pub fn put_form(path: &str, form: Vec<(String, String)>) -> ApiRequest {
        ApiRequest {
            method: Method::Put,
            ..ApiRequest::post_form(path, form)
        }
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP session: {0}")]
    Session(#[source] reqwest::Error),
}

impl TransportError {
    pub fn is_connection_reset(&self) -> bool {
        match self {
            TransportError::Request { source, .. } => is_connection_reset(source),
            TransportError::Session(_) => false,
        }
    }
}

/// Sends one request and waits for the whole response.
pub trait Transport {
    fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request)
    }
}
