//! Client-credentials exchange against PayPal's token endpoint.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::payment::PaymentError;

use super::token_cache::{CredentialExchange, IssuedToken};
use super::wire_types::TokenResponse;

/// Exchanges the merchant's client id and secret for a bearer token.
pub struct PayPalOAuthClient {
    http_client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: SecretString,
}

impl PayPalOAuthClient {
    pub fn new(
        http_client: reqwest::Client,
        api_base_url: &str,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Self {
        Self {
            http_client,
            token_url: format!("{}/v1/oauth2/token", api_base_url.trim_end_matches('/')),
            client_id: client_id.into(),
            client_secret,
        }
    }
}

#[async_trait]
impl CredentialExchange for PayPalOAuthClient {
    async fn exchange(&self) -> Result<IssuedToken, PaymentError> {
        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "PayPal token request failed");
                PaymentError::auth(format!("Token request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "PayPal token request rejected");
            return Err(PaymentError::auth(format!(
                "Token endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            PaymentError::auth(format!("Failed to parse token response: {}", e))
        })?;

        if token.access_token.is_empty() {
            return Err(PaymentError::auth("Token response contained no access token"));
        }

        Ok(IssuedToken {
            access_token: SecretString::new(token.access_token),
            expires_in_secs: token.expires_in,
        })
    }
}
