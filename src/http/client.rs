//! Authenticated HTTP client for the repository API.

use crate::error::{HarnessError, Result};
use reqwest::blocking::{Body, Client, RequestBuilder};
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Default request timeout. Large uploads need more than the usual 30s.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(300);

/// How requests authenticate against the repository.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP basic auth.
    Basic { username: String, password: String },
    /// `Authorization: Bearer <token>`.
    Bearer(String),
}

impl Auth {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
            Auth::Bearer(token) => request.bearer_auth(token),
        }
    }
}

// Credentials stay out of debug logs.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Auth::Bearer(_) => f.debug_tuple("Bearer").field(&"***").finish(),
        }
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Require an exact status code.
    ///
    /// # Errors
    ///
    /// Returns `VerificationFailure` carrying the response body.
    pub fn expect_status(self, expected: u16) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(HarnessError::VerificationFailure {
                url: self.url,
                expected,
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Blocking client for the artifact repository.
pub struct ArtifactClient {
    client: Client,
    auth: Auth,
    timeout: Duration,
}

impl ArtifactClient {
    /// Create a client with the default timeout.
    pub fn new(auth: Auth) -> Result<Self> {
        Self::with_timeout(auth, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(auth: Auth, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("artifact-harness/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            auth,
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Upload a payload with PUT.
    pub fn put_bytes(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse> {
        tracing::debug!("PUT {} ({} bytes)", url, body.len());
        let request = self.auth.apply(self.client.put(url)).body(body);
        Self::send(url, request)
    }

    /// Upload a file with PUT, streaming it from disk.
    ///
    /// The request carries a `Content-Length` taken from the file metadata.
    pub fn put_file(&self, url: &str, path: &Path) -> Result<HttpResponse> {
        let file = File::open(path)?;
        tracing::debug!("PUT {} (streaming {})", url, path.display());
        let request = self.auth.apply(self.client.put(url)).body(Body::from(file));
        Self::send(url, request)
    }

    /// Fetch a resource with GET.
    pub fn get(&self, url: &str) -> Result<HttpResponse> {
        tracing::debug!("GET {}", url);
        let request = self.auth.apply(self.client.get(url));
        Self::send(url, request)
    }

    fn send(url: &str, request: RequestBuilder) -> Result<HttpResponse> {
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        tracing::debug!("{} -> HTTP {}", url, status);

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}
