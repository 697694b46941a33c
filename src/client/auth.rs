use reqwest::Method;
use tracing::{info, warn};

use super::Client;
use crate::error::{Error, Result};
use crate::security::decode_claims;
use crate::types::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, ResetPasswordOutcome, ResetPasswordRequest,
};

/// Auth API client.
#[derive(Debug)]
pub struct AuthApi<'a> {
    pub(super) client: &'a Client,
}

impl AuthApi<'_> {
    /// Log in and persist the returned session token.
    ///
    /// Returns the token that was stored.
    pub async fn login(&self, email: impl Into<String>, password: impl Into<String>) -> Result<String> {
        let req = LoginRequest {
            email: email.into(),
            password: password.into(),
        };
        let request = self.client.request(Method::POST, "/api/login")?.json(&req);
        let response: LoginResponse = Client::send(request).await?;

        let token = response
            .data
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingToken)?;
        self.client.session.store_token(&token)?;

        match decode_claims(&token) {
            Ok(claims) => info!(
                name: "auth.login",
                role = claims.role.as_deref().unwrap_or("<none>"),
                exp = claims.exp,
                "Logged in"
            ),
            Err(err) => warn!(name: "auth.login.undecodable", error = %err, "Stored a token that does not decode"),
        }
        Ok(token)
    }

    /// Forget the persisted session token.
    pub fn logout(&self) -> Result<()> {
        self.client.session.clear()?;
        info!(name: "auth.logout", "Logged out");
        Ok(())
    }

    /// Ask the backend to e-mail a password reset link.
    pub async fn forgot_password(&self, email: impl Into<String>) -> Result<serde_json::Value> {
        let req = ForgotPasswordRequest { email: email.into() };
        let request = self.client.request(Method::POST, "/api/auth/forgot")?.json(&req);
        Client::send(request).await
    }

    /// Set a new password using a reset token.
    ///
    /// Rejections from the backend are reported in the outcome, not as `Err`.
    pub async fn reset_password(
        &self,
        token: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Result<ResetPasswordOutcome> {
        let req = ResetPasswordRequest {
            token: token.into(),
            new_password: new_password.into(),
        };
        let response = self
            .client
            .request(Method::POST, "/api/auth/reset")?
            .json(&req)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let data = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
        Ok(ResetPasswordOutcome {
            ok: status.is_success(),
            status: status.as_u16(),
            data,
        })
    }
}
