//! PayPal webhook event types.
//!
//! Defines the envelope PayPal delivers to the webhook endpoint and the typed
//! [`PaymentEvent`] it is converted into before dispatch. Only fields relevant
//! to our processing are captured; resources are parsed leniently so a shape
//! change on the provider side degrades to empty fields instead of failing the
//! delivery.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::foundation::{CurrencyCode, Money};

pub const TRANSMISSION_ID_HEADER: &str = "paypal-transmission-id";
pub const TRANSMISSION_TIME_HEADER: &str = "paypal-transmission-time";
pub const CERT_URL_HEADER: &str = "paypal-cert-url";
pub const AUTH_ALGO_HEADER: &str = "paypal-auth-algo";
pub const TRANSMISSION_SIG_HEADER: &str = "paypal-transmission-sig";

/// The five transmission headers PayPal signs each delivery with.
///
/// Missing headers are carried as empty strings; the provider decides whether
/// the set is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransmissionHeaders {
    pub transmission_id: String,
    pub transmission_time: String,
    pub cert_url: String,
    pub auth_algo: String,
    pub transmission_sig: String,
}

impl TransmissionHeaders {
    /// Builds the header set from any lookup keyed by lowercase header name.
    pub fn from_fn<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).unwrap_or_default();
        Self {
            transmission_id: get(TRANSMISSION_ID_HEADER),
            transmission_time: get(TRANSMISSION_TIME_HEADER),
            cert_url: get(CERT_URL_HEADER),
            auth_algo: get(AUTH_ALGO_HEADER),
            transmission_sig: get(TRANSMISSION_SIG_HEADER),
        }
    }

    /// True when every header was present and non-empty.
    pub fn is_complete(&self) -> bool {
        [
            &self.transmission_id,
            &self.transmission_time,
            &self.cert_url,
            &self.auth_algo,
            &self.transmission_sig,
        ]
        .iter()
        .all(|value| !value.is_empty())
    }
}

/// Webhook event envelope as delivered by PayPal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    /// Event id (`WH-...`).
    pub id: String,

    /// Dotted event name, e.g. `PAYMENT.CAPTURE.COMPLETED`.
    pub event_type: String,

    pub create_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Event-specific object; its shape depends on `event_type`.
    #[serde(default)]
    pub resource: Value,
}

impl WebhookEnvelope {
    /// Parses a raw webhook body.
    pub fn parse(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    /// Parses the event type into a known kind, if it is one.
    pub fn kind(&self) -> Option<PaymentEventKind> {
        PaymentEventKind::parse(&self.event_type)
    }

    fn resource_as<T: DeserializeOwned + Default>(&self) -> T {
        serde_json::from_value(self.resource.clone()).unwrap_or_default()
    }
}

/// Event types this relay knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentEventKind {
    OrderCompleted,
    OrderApproved,
    CaptureCompleted,
    CaptureDenied,
    CaptureRefunded,
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionCancelled,
}

impl PaymentEventKind {
    pub const ALL: [PaymentEventKind; 8] = [
        PaymentEventKind::OrderCompleted,
        PaymentEventKind::OrderApproved,
        PaymentEventKind::CaptureCompleted,
        PaymentEventKind::CaptureDenied,
        PaymentEventKind::CaptureRefunded,
        PaymentEventKind::SubscriptionCreated,
        PaymentEventKind::SubscriptionUpdated,
        PaymentEventKind::SubscriptionCancelled,
    ];

    pub fn parse(event_type: &str) -> Option<Self> {
        match event_type {
            "CHECKOUT.ORDER.COMPLETED" => Some(Self::OrderCompleted),
            "CHECKOUT.ORDER.APPROVED" => Some(Self::OrderApproved),
            "PAYMENT.CAPTURE.COMPLETED" => Some(Self::CaptureCompleted),
            "PAYMENT.CAPTURE.DENIED" => Some(Self::CaptureDenied),
            "PAYMENT.CAPTURE.REFUNDED" => Some(Self::CaptureRefunded),
            "BILLING.SUBSCRIPTION.CREATED" => Some(Self::SubscriptionCreated),
            "BILLING.SUBSCRIPTION.UPDATED" => Some(Self::SubscriptionUpdated),
            "BILLING.SUBSCRIPTION.CANCELLED" => Some(Self::SubscriptionCancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderCompleted => "CHECKOUT.ORDER.COMPLETED",
            Self::OrderApproved => "CHECKOUT.ORDER.APPROVED",
            Self::CaptureCompleted => "PAYMENT.CAPTURE.COMPLETED",
            Self::CaptureDenied => "PAYMENT.CAPTURE.DENIED",
            Self::CaptureRefunded => "PAYMENT.CAPTURE.REFUNDED",
            Self::SubscriptionCreated => "BILLING.SUBSCRIPTION.CREATED",
            Self::SubscriptionUpdated => "BILLING.SUBSCRIPTION.UPDATED",
            Self::SubscriptionCancelled => "BILLING.SUBSCRIPTION.CANCELLED",
        }
    }
}

/// Amount as PayPal renders it inside event resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAmount {
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub value: String,
}

impl ProviderAmount {
    /// Converts to minor units; `None` when currency or value is malformed.
    pub fn to_money(&self) -> Option<Money> {
        let currency = CurrencyCode::new(&self.currency_code).ok()?;
        Money::from_major_str(&self.value, currency).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseUnitResource {
    #[serde(deserialize_with = "lenient")]
    pub amount: Option<ProviderAmount>,
    #[serde(deserialize_with = "lenient_string")]
    pub reference_id: Option<String>,
}

/// `CHECKOUT.ORDER.*` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderResource {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub purchase_units: Vec<PurchaseUnitResource>,
}

impl OrderResource {
    /// Amount of the first purchase unit.
    pub fn amount(&self) -> Option<&ProviderAmount> {
        self.purchase_units.first()?.amount.as_ref()
    }
}

/// `PAYMENT.CAPTURE.COMPLETED` / `PAYMENT.CAPTURE.DENIED` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureResource {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub amount: Option<ProviderAmount>,
}

/// `PAYMENT.CAPTURE.REFUNDED` resource (the refund object).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundResource {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub amount: Option<ProviderAmount>,
}

/// `BILLING.SUBSCRIPTION.*` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionResource {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub plan_id: Option<String>,
}

/// A field of the wrong shape becomes its default; its siblings still parse.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`], but numeric ids are kept as their decimal text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A webhook event converted into its typed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    OrderCompleted(OrderResource),
    OrderApproved(OrderResource),
    CaptureCompleted(CaptureResource),
    CaptureDenied(CaptureResource),
    CaptureRefunded(RefundResource),
    SubscriptionCreated(SubscriptionResource),
    SubscriptionUpdated(SubscriptionResource),
    SubscriptionCancelled(SubscriptionResource),
    Unknown { event_type: String },
}

impl PaymentEvent {
    pub fn from_envelope(envelope: &WebhookEnvelope) -> Self {
        let Some(kind) = envelope.kind() else {
            return PaymentEvent::Unknown {
                event_type: envelope.event_type.clone(),
            };
        };

        match kind {
            PaymentEventKind::OrderCompleted => Self::OrderCompleted(envelope.resource_as()),
            PaymentEventKind::OrderApproved => Self::OrderApproved(envelope.resource_as()),
            PaymentEventKind::CaptureCompleted => Self::CaptureCompleted(envelope.resource_as()),
            PaymentEventKind::CaptureDenied => Self::CaptureDenied(envelope.resource_as()),
            PaymentEventKind::CaptureRefunded => Self::CaptureRefunded(envelope.resource_as()),
            PaymentEventKind::SubscriptionCreated => {
                Self::SubscriptionCreated(envelope.resource_as())
            }
            PaymentEventKind::SubscriptionUpdated => {
                Self::SubscriptionUpdated(envelope.resource_as())
            }
            PaymentEventKind::SubscriptionCancelled => {
                Self::SubscriptionCancelled(envelope.resource_as())
            }
        }
    }

    pub fn kind(&self) -> Option<PaymentEventKind> {
        match self {
            Self::OrderCompleted(_) => Some(PaymentEventKind::OrderCompleted),
            Self::OrderApproved(_) => Some(PaymentEventKind::OrderApproved),
            Self::CaptureCompleted(_) => Some(PaymentEventKind::CaptureCompleted),
            Self::CaptureDenied(_) => Some(PaymentEventKind::CaptureDenied),
            Self::CaptureRefunded(_) => Some(PaymentEventKind::CaptureRefunded),
            Self::SubscriptionCreated(_) => Some(PaymentEventKind::SubscriptionCreated),
            Self::SubscriptionUpdated(_) => Some(PaymentEventKind::SubscriptionUpdated),
            Self::SubscriptionCancelled(_) => Some(PaymentEventKind::SubscriptionCancelled),
            Self::Unknown { .. } => None,
        }
    }
}

/// A typed event together with its envelope metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentNotification {
    pub id: String,
    pub event_type: String,
    pub create_time: DateTime<Utc>,
    pub summary: Option<String>,
    pub event: PaymentEvent,
}

impl PaymentNotification {
    pub fn from_envelope(envelope: &WebhookEnvelope) -> Self {
        Self {
            id: envelope.id.clone(),
            event_type: envelope.event_type.clone(),
            create_time: envelope.create_time,
            summary: envelope.summary.clone(),
            event: PaymentEvent::from_envelope(envelope),
        }
    }

    pub fn kind(&self) -> Option<PaymentEventKind> {
        self.event.kind()
    }
}
