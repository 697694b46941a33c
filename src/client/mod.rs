//! HTTP client for the fleet backend.
//!
//! Every request carries the session token from the injected [`Session`] as a
//! bearer credential. Non-success responses become [`Error::Api`] with the
//! most specific message the body offers.
//!
//! # Example
//!
//! ```rust,no_run
//! use fleet_admin::client::Client;
//! use fleet_admin::security::{MemorySessionStore, Session};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("http://localhost:8080", Session::new(MemorySessionStore::new()))?;
//!
//! client.auth().login("admin@example.com", "secret").await?;
//! let vehicles = client.vehicles().list().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod fleet;
mod forms;
mod ledger;
mod reports;

pub use auth::AuthApi;
pub use fleet::{OrdersApi, UsersApi, VehiclesApi};
pub use forms::{FormsApi, SubmissionsApi};
pub use ledger::{ExpensesApi, FinanceApi};
pub use reports::{KpiApi, ReportsApi};

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::security::Session;

/// HTTP client for the backend REST API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    session: Session,
}

impl Client {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend root (e.g., "http://localhost:8080")
    /// * `session` - Where the bearer token is read from and stored to
    pub fn new(base_url: impl AsRef<str>, session: Session) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new(), session)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: impl AsRef<str>,
        timeout: Duration,
        session: Session,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http, session)
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        http: reqwest::Client,
        session: Session,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // Paths are appended to the base, so it has to end like a directory.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the Auth API.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    /// Access the Users API.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    /// Access the Vehicles API.
    pub fn vehicles(&self) -> VehiclesApi<'_> {
        VehiclesApi { client: self }
    }

    /// Access the Orders API.
    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi { client: self }
    }

    /// Access the Forms (questions) API.
    pub fn forms(&self) -> FormsApi<'_> {
        FormsApi { client: self }
    }

    /// Access the Submissions API.
    pub fn submissions(&self) -> SubmissionsApi<'_> {
        SubmissionsApi { client: self }
    }

    /// Access the Expenses API.
    pub fn expenses(&self) -> ExpensesApi<'_> {
        ExpensesApi { client: self }
    }

    /// Access the Financial Records API.
    pub fn finance(&self) -> FinanceApi<'_> {
        FinanceApi { client: self }
    }

    /// Access the Reports API.
    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi { client: self }
    }

    /// Access the KPI API.
    pub fn kpi(&self) -> KpiApi<'_> {
        KpiApi { client: self }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!(name: "api.request", method = %method, url = %url, "Sending request");
        Ok(self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, self.session.bearer()))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            let body = if body.trim().is_empty() { "null" } else { &body };
            Ok(serde_json::from_str(body)?)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            })
        }
    }
}

/// Pick the message for a failed response: the JSON `message`, then the JSON
/// `error`, then the raw body, then the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value
                .get(key)
                .and_then(serde_json::Value::as_str)
                .filter(|m| !m.is_empty())
            {
                return message.to_string();
            }
        }
    }
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

/// Payload that the backend may or may not wrap in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaybeEnveloped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::MemorySessionStore;

    fn session() -> Session {
        Session::new(MemorySessionStore::new())
    }

    #[test]
    fn test_error_message_precedence() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(status, r#"{"message":"bad email","error":"x"}"#),
            "bad email"
        );
        assert_eq!(error_message(status, r#"{"error":"nope"}"#), "nope");
        assert_eq!(error_message(status, r#"{"detail":"x"}"#), r#"{"detail":"x"}"#);
        assert_eq!(error_message(status, "plain text"), "plain text");
        assert_eq!(error_message(status, ""), "Bad Request");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = Client::new("http://localhost:8080/backend", session()).unwrap();
        assert_eq!(
            client.url("/api/users").unwrap().as_str(),
            "http://localhost:8080/backend/api/users"
        );

        let root = Client::new("http://localhost:8080", session()).unwrap();
        assert_eq!(
            root.url("api/vehicles/4").unwrap().as_str(),
            "http://localhost:8080/api/vehicles/4"
        );
    }

    #[test]
    fn test_maybe_enveloped() {
        let wrapped: MaybeEnveloped<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);
        let bare: MaybeEnveloped<Vec<u32>> = serde_json::from_str("[3]").unwrap();
        assert_eq!(bare.into_inner(), vec![3]);
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Client::new("not a url", session()),
            Err(Error::InvalidUrl(_))
        ));
    }
}
