//! PayPal payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the PayPal REST API:
//! checkout orders, capture refunds, invoicing-based payment links, and
//! webhook signature verification.
//!
//! # Security
//!
//! - Client secret and bearer tokens are held as `secrecy::SecretString`
//! - Webhook authenticity is decided by PayPal's verification endpoint;
//!   every failure on that path is treated as "not verified"
//!
//! # Configuration
//!
//! ```ignore
//! let config = PayPalConfig::new(client_id, client_secret)
//!     .with_base_url("https://api-m.sandbox.paypal.com");
//! let adapter = PayPalPaymentAdapter::from_config(config)?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use uuid::Uuid;

use crate::domain::foundation::OrderId;
use crate::domain::payment::{
    OrderRequest, OrderResult, PaymentError, PaymentLink, PaymentLinkRequest, RefundRequest,
    RefundResult, TransmissionHeaders, WebhookEnvelope,
};
use crate::ports::{PaymentProvider, SystemClock};

use super::oauth::PayPalOAuthClient;
use super::token_cache::TokenCache;
use super::wire_types::{
    CreateOrderBody, InvoiceBody, InvoiceResponse, OrderResponse, ProviderErrorBody, RefundBody,
    RefundResponse, SendInvoiceBody, VerifySignatureBody, VerifySignatureResponse,
};

pub const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
pub const LIVE_BASE_URL: &str = "https://api-m.paypal.com";

/// PayPal API configuration.
#[derive(Clone)]
pub struct PayPalConfig {
    client_id: String,
    client_secret: SecretString,

    /// Base URL for the PayPal API (default: sandbox).
    api_base_url: String,

    /// Per-request timeout for every outbound call.
    timeout: Duration,
}

impl PayPalConfig {
    /// Create a sandbox configuration with a 30 second timeout.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            api_base_url: SANDBOX_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the API base URL (live endpoint, or a local server in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// PayPal payment provider adapter.
pub struct PayPalPaymentAdapter {
    config: PayPalConfig,
    http_client: reqwest::Client,
    tokens: Arc<TokenCache>,
}

impl PayPalPaymentAdapter {
    /// Create an adapter sharing an existing HTTP client and token cache.
    pub fn new(config: PayPalConfig, http_client: reqwest::Client, tokens: Arc<TokenCache>) -> Self {
        Self {
            config,
            http_client,
            tokens,
        }
    }

    /// Create an adapter with its own HTTP client, OAuth exchange and
    /// system-clock token cache.
    pub fn from_config(config: PayPalConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("Failed to create HTTP client: {}", e)))?;

        let exchange = PayPalOAuthClient::new(
            http_client.clone(),
            &config.api_base_url,
            config.client_id.clone(),
            config.client_secret.clone(),
        );
        let tokens = Arc::new(TokenCache::new(Arc::new(exchange), Arc::new(SystemClock)));

        Ok(Self::new(config, http_client, tokens))
    }

    /// The token cache backing this adapter.
    pub fn token_cache(&self) -> Arc<TokenCache> {
        Arc::clone(&self.tokens)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> PaymentError {
        if e.is_timeout() {
            PaymentError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            PaymentError::network(format!("Connection failed: {}", e))
        } else {
            PaymentError::network(e.to_string())
        }
    }

    /// Attaches the bearer token and sends the request.
    ///
    /// A 401 answer drops the cached token so the next call re-authenticates.
    async fn send_authorized(&self, request: RequestBuilder) -> Result<Response, PaymentError> {
        let token = self.tokens.get_token().await?;

        let response = request
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("PayPal rejected bearer token, invalidating cache");
            self.tokens.invalidate().await;
        }

        Ok(response)
    }

    /// Builds a `Provider` error from a non-success response.
    async fn provider_error(&self, response: Response, operation: &str) -> PaymentError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ProviderErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.describe());

        tracing::error!(operation, status, body = %body, "PayPal request failed");

        let message = match detail {
            Some(detail) => format!("PayPal {} failed: {}", operation, detail),
            None => format!("PayPal {} failed with HTTP {}", operation, status),
        };
        PaymentError::provider(status, message)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, PaymentError> {
        response.json::<T>().await.map_err(|e| {
            PaymentError::provider_message(format!("Failed to parse PayPal response: {}", e))
        })
    }

    async fn fetch_order(&self, order_id: &OrderId) -> Result<OrderResult, PaymentError> {
        let url = self.url(&format!("/v2/checkout/orders/{}", order_id));
        let response = self.send_authorized(self.http_client.get(&url)).await?;

        if response.status() != StatusCode::OK {
            return Err(self.provider_error(response, "get order").await);
        }

        Self::read_json::<OrderResponse>(response).await?.into_result()
    }
}

#[async_trait]
impl PaymentProvider for PayPalPaymentAdapter {
    async fn create_order(&self, request: OrderRequest) -> Result<OrderResult, PaymentError> {
        let body = CreateOrderBody::from(&request);
        let request_id = Uuid::new_v4().to_string();

        let response = self
            .send_authorized(
                self.http_client
                    .post(self.url("/v2/checkout/orders"))
                    .header("PayPal-Request-Id", &request_id)
                    .json(&body),
            )
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(self.provider_error(response, "create order").await);
        }

        let result = Self::read_json::<OrderResponse>(response)
            .await?
            .into_result()?;

        tracing::info!(
            order_id = %result.provider_id,
            status = result.status.as_str(),
            amount = %request.amount,
            paypal_request_id = %request_id,
            "PayPal order created"
        );
        Ok(result)
    }

    async fn confirm_order(&self, order_id: &OrderId) -> Result<OrderResult, PaymentError> {
        let url = self.url(&format!("/v2/checkout/orders/{}/capture", order_id));
        let response = self
            .send_authorized(
                self.http_client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .body("{}"),
            )
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(self.provider_error(response, "capture order").await);
        }

        let result = Self::read_json::<OrderResponse>(response)
            .await?
            .into_result()?;

        tracing::info!(
            order_id = %result.provider_id,
            status = result.status.as_str(),
            capture_id = ?result.capture_id.as_ref().map(|c| c.as_str()),
            "PayPal order captured"
        );
        Ok(result)
    }

    async fn get_order_status(&self, order_id: &OrderId) -> Result<OrderResult, PaymentError> {
        self.fetch_order(order_id).await.map_err(|e| {
            tracing::warn!(order_id = %order_id, error = %e, "PayPal order lookup failed");
            PaymentError::not_found(format!("Order {}", order_id))
        })
    }

    async fn refund_payment(&self, request: RefundRequest) -> Result<RefundResult, PaymentError> {
        let url = self.url(&format!(
            "/v2/payments/captures/{}/refund",
            request.capture_id
        ));
        let body = RefundBody::from(&request);

        let response = self
            .send_authorized(
                self.http_client
                    .post(&url)
                    .header("PayPal-Request-Id", Uuid::new_v4().to_string())
                    .json(&body),
            )
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(self.provider_error(response, "refund").await);
        }

        let result = Self::read_json::<RefundResponse>(response)
            .await?
            .into_result()?;

        tracing::info!(
            capture_id = %request.capture_id,
            refund_id = %result.refund_id,
            status = result.status.as_str(),
            amount = %request.amount,
            "PayPal refund created"
        );
        Ok(result)
    }

    async fn create_payment_link(
        &self,
        request: PaymentLinkRequest,
    ) -> Result<PaymentLink, PaymentError> {
        let body = InvoiceBody::from(&request);

        let response = self
            .send_authorized(
                self.http_client
                    .post(self.url("/v2/invoicing/invoices"))
                    .header("Prefer", "return=representation")
                    .json(&body),
            )
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(self.provider_error(response, "create invoice").await);
        }

        let invoice = Self::read_json::<InvoiceResponse>(response).await?;
        let invoice_id = invoice
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                PaymentError::provider_message("PayPal response did not contain an invoice id")
            })?;

        // The send step's outcome is reported, not enforced.
        let send_url = self.url(&format!("/v2/invoicing/invoices/{}/send", invoice_id));
        let send_confirmed = match self
            .send_authorized(self.http_client.post(&send_url).json(&SendInvoiceBody {
                send_to_recipient: request.recipient_email.is_some(),
            }))
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(
                    invoice_id = %invoice_id,
                    status = response.status().as_u16(),
                    "PayPal invoice send was not acknowledged"
                );
                false
            }
            Err(e) => {
                tracing::warn!(invoice_id = %invoice_id, error = %e, "PayPal invoice send failed");
                false
            }
        };

        tracing::info!(invoice_id = %invoice_id, send_confirmed, "PayPal payment link created");

        Ok(PaymentLink {
            payment_link: invoice.payer_view_url(),
            invoice_id,
            status: invoice.status.unwrap_or_default(),
            links: invoice.links,
            send_confirmed,
        })
    }

    async fn verify_webhook_signature(
        &self,
        webhook_id: &str,
        raw_body: &[u8],
        headers: &TransmissionHeaders,
    ) -> bool {
        let event: Box<RawValue> = match serde_json::from_slice(raw_body) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Webhook body is not JSON; treating as unverified");
                return false;
            }
        };

        let body = VerifySignatureBody::new(headers, webhook_id, &event);
        let response = match self
            .send_authorized(
                self.http_client
                    .post(self.url("/v1/notifications/verify-webhook-signature"))
                    .json(&body),
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Webhook signature verification call failed");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                status = response.status().as_u16(),
                "Webhook signature verification rejected by PayPal"
            );
            return false;
        }

        match response.json::<VerifySignatureResponse>().await {
            Ok(verification) => {
                if !verification.is_success() {
                    tracing::warn!(
                        transmission_id = %headers.transmission_id,
                        verification_status = %verification.verification_status,
                        "Webhook signature not verified"
                    );
                }
                verification.is_success()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unparsable webhook verification response");
                false
            }
        }
    }

    async fn get_webhook_event(&self, event_id: &str) -> Result<WebhookEnvelope, PaymentError> {
        if event_id.trim().is_empty()
            || !event_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PaymentError::validation("event_id", "invalid webhook event id"));
        }

        let url = self.url(&format!("/v1/notifications/webhooks-events/{}", event_id));
        let response = self.send_authorized(self.http_client.get(&url)).await?;

        match response.status() {
            StatusCode::OK => Self::read_json::<WebhookEnvelope>(response).await,
            StatusCode::NOT_FOUND => Err(PaymentError::not_found(format!(
                "Webhook event {}",
                event_id
            ))),
            _ => Err(self.provider_error(response, "get webhook event").await),
        }
    }
}
