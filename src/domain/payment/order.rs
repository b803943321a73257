//! Checkout order types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{CaptureId, Money, OrderId};

/// A request to create a checkout order. Immutable once submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub amount: Money,
    pub description: Option<String>,
    /// Opaque merchant data forwarded to the provider as `custom_id`.
    pub metadata: Option<Value>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
}

impl OrderRequest {
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            description: None,
            metadata: None,
            return_url: None,
            cancel_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }
}

/// Order lifecycle status as reported by PayPal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Created,
    Saved,
    Approved,
    Voided,
    Completed,
    PayerActionRequired,
    /// A status this relay does not know; passed through verbatim.
    Unknown(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Saved => "SAVED",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Voided => "VOIDED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::PayerActionRequired => "PAYER_ACTION_REQUIRED",
            OrderStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "CREATED" => OrderStatus::Created,
            "SAVED" => OrderStatus::Saved,
            "APPROVED" => OrderStatus::Approved,
            "VOIDED" => OrderStatus::Voided,
            "COMPLETED" => OrderStatus::Completed,
            "PAYER_ACTION_REQUIRED" => OrderStatus::PayerActionRequired,
            _ => OrderStatus::Unknown(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

/// HATEOAS link returned by the provider (e.g. the `approve` URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Payer details PayPal attaches to approved and captured orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
}

/// Result of an order create, capture, or lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderResult {
    pub provider_id: OrderId,
    pub status: OrderStatus,
    pub links: Vec<Link>,
    pub capture_id: Option<CaptureId>,
    pub payer: Option<Payer>,
    pub amount: Option<Money>,
}

impl OrderResult {
    pub fn new(provider_id: OrderId, status: OrderStatus) -> Self {
        Self {
            provider_id,
            status,
            links: Vec::new(),
            capture_id: None,
            payer: None,
            amount: None,
        }
    }

    /// URL the buyer must visit to approve the order, if the provider sent one.
    pub fn approval_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "approve" || link.rel == "payer-action")
            .map(|link| link.href.as_str())
    }
}

/// Outcome of a cancel request. PayPal has no cancel primitive for orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOutcome {
    pub order_id: OrderId,
    pub message: String,
}
