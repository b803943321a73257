//! HTTP DTOs (Data Transfer Objects) for order and payment endpoints.
//!
//! JSON on this surface is camelCase and amounts are integer minor units.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::{
    CreateOrderCommand, CreatePaymentLinkCommand, RefundPaymentCommand,
};
use crate::domain::foundation::Money;
use crate::domain::payment::{
    CancelOutcome, Link, OrderResult, Payer, PaymentLink, RefundResult,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a checkout order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Amount in minor units.
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Opaque merchant data, forwarded as the order's custom id.
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub return_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
}

impl From<CreateOrderRequest> for CreateOrderCommand {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            amount: req.amount,
            currency: req.currency,
            description: req.description,
            metadata: req.metadata,
            return_url: req.return_url,
            cancel_url: req.cancel_url,
        }
    }
}

/// Request to refund a capture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Sent to the payer as the refund note.
    #[serde(default)]
    pub description: Option<String>,
}

impl RefundRequest {
    pub fn into_command(self, capture_id: String) -> RefundPaymentCommand {
        RefundPaymentCommand {
            capture_id,
            amount: self.amount,
            currency: self.currency,
            note: self.description,
        }
    }
}

/// Request for a shareable payment link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLinkRequest {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub recipient_email: Option<String>,
}

impl From<CreatePaymentLinkRequest> for CreatePaymentLinkCommand {
    fn from(req: CreatePaymentLinkRequest) -> Self {
        Self {
            amount: req.amount,
            currency: req.currency,
            description: req.description,
            reference_id: req.reference_id,
            recipient_email: req.recipient_email,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Success envelope: `{success: true, data: ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success envelope carrying only a message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl From<CancelOutcome> for MessageResponse {
    fn from(outcome: CancelOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message,
        }
    }
}

/// Amount in minor units with its currency.
#[derive(Debug, Clone, Serialize)]
pub struct AmountView {
    pub amount: i64,
    pub currency: String,
}

impl From<&Money> for AmountView {
    fn from(money: &Money) -> Self {
        Self {
            amount: money.minor_units(),
            currency: money.currency().as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedView {
    pub order_id: String,
    pub status: String,
    pub links: Vec<Link>,
}

impl From<OrderResult> for OrderCreatedView {
    fn from(result: OrderResult) -> Self {
        Self {
            order_id: result.provider_id.to_string(),
            status: result.status.as_str().to_string(),
            links: result.links,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmedView {
    pub order_id: String,
    pub status: String,
    pub payer: Option<Payer>,
    pub capture_id: Option<String>,
}

impl From<OrderResult> for OrderConfirmedView {
    fn from(result: OrderResult) -> Self {
        Self {
            order_id: result.provider_id.to_string(),
            status: result.status.as_str().to_string(),
            payer: result.payer,
            capture_id: result.capture_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusView {
    pub order_id: String,
    pub status: String,
    pub payer: Option<Payer>,
    pub amount: Option<AmountView>,
    pub capture_id: Option<String>,
}

impl From<OrderResult> for OrderStatusView {
    fn from(result: OrderResult) -> Self {
        Self {
            order_id: result.provider_id.to_string(),
            status: result.status.as_str().to_string(),
            payer: result.payer,
            amount: result.amount.as_ref().map(AmountView::from),
            capture_id: result.capture_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundView {
    pub refund_id: String,
    pub status: String,
    pub links: Vec<Link>,
}

impl From<RefundResult> for RefundView {
    fn from(result: RefundResult) -> Self {
        Self {
            refund_id: result.refund_id,
            status: result.status.as_str().to_string(),
            links: result.links,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkView {
    pub invoice_id: String,
    pub status: String,
    pub payment_link: Option<String>,
    pub send_confirmed: bool,
}

impl From<PaymentLink> for PaymentLinkView {
    fn from(link: PaymentLink) -> Self {
        Self {
            invoice_id: link.invoice_id,
            status: link.status,
            payment_link: link.payment_link,
            send_confirmed: link.send_confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CaptureId, CurrencyCode, OrderId};
    use crate::domain::payment::OrderStatus;
    use serde_json::json;

    #[test]
    fn create_order_request_reads_camel_case() {
        let req: CreateOrderRequest = serde_json::from_value(json!({
            "amount": 1000,
            "currency": "usd",
            "returnUrl": "https://shop.example/return",
            "cancelUrl": "https://shop.example/cancel",
            "metadata": {"cart": "c-1"}
        }))
        .unwrap();

        let cmd = CreateOrderCommand::from(req);
        assert_eq!(cmd.amount, Some(1000));
        assert_eq!(cmd.return_url.as_deref(), Some("https://shop.example/return"));
        assert_eq!(cmd.cancel_url.as_deref(), Some("https://shop.example/cancel"));
        assert_eq!(cmd.metadata, Some(json!({"cart": "c-1"})));
    }

    #[test]
    fn empty_body_deserializes_to_missing_fields() {
        let req: CreateOrderRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.amount.is_none());
        assert!(req.currency.is_none());
    }

    #[test]
    fn refund_description_becomes_note() {
        let req: RefundRequest =
            serde_json::from_value(json!({"amount": 500, "currency": "USD", "description": "damaged"}))
                .unwrap();
        let cmd = req.into_command("CAP-1".to_string());
        assert_eq!(cmd.capture_id, "CAP-1");
        assert_eq!(cmd.note.as_deref(), Some("damaged"));
    }

    #[test]
    fn status_view_serializes_minor_units() {
        let mut result = OrderResult::new(OrderId::new("O1").unwrap(), OrderStatus::Completed);
        result.amount = Some(Money::new(1000, CurrencyCode::new("USD").unwrap()));
        result.capture_id = Some(CaptureId::new("C1").unwrap());

        let value = serde_json::to_value(DataResponse::ok(OrderStatusView::from(result))).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["orderId"], "O1");
        assert_eq!(value["data"]["status"], "COMPLETED");
        assert_eq!(value["data"]["captureId"], "C1");
        assert_eq!(value["data"]["amount"], json!({"amount": 1000, "currency": "USD"}));
    }

    #[test]
    fn payment_link_view_is_camel_case() {
        let view = PaymentLinkView::from(PaymentLink {
            invoice_id: "INV2-1".to_string(),
            status: "SENT".to_string(),
            payment_link: Some("https://pay.example/inv".to_string()),
            links: vec![],
            send_confirmed: false,
        });
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["invoiceId"], "INV2-1");
        assert_eq!(value["paymentLink"], "https://pay.example/inv");
        assert_eq!(value["sendConfirmed"], false);
    }
}
