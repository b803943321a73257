//! PayPal REST API request and response bodies.
//!
//! Only fields relevant to our processing are captured. Response types
//! default every field so a missing value surfaces as a domain-level
//! "missing id" failure rather than a parse error.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

use crate::domain::foundation::{CaptureId, Money, OrderId};
use crate::domain::payment::{
    Link, OrderRequest, OrderResult, OrderStatus, Payer, PaymentError, PaymentLinkRequest,
    ProviderAmount, RefundRequest, RefundResult, RefundStatus, TransmissionHeaders,
};

/// PayPal's limit on `custom_id`.
const CUSTOM_ID_MAX_CHARS: usize = 127;

// ════════════════════════════════════════════════════════════════════════════
// OAuth
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
}

// ════════════════════════════════════════════════════════════════════════════
// Shared
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmountBody {
    pub currency_code: String,
    pub value: String,
}

impl From<&Money> for AmountBody {
    fn from(money: &Money) -> Self {
        Self {
            currency_code: money.currency().to_string(),
            value: money.to_major_string(),
        }
    }
}

/// Error body PayPal returns on 4xx/5xx.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub debug_id: Option<String>,
}

impl ProviderErrorBody {
    /// Folds the error body into one line; `None` when it carried nothing useful.
    pub fn describe(&self) -> Option<String> {
        let mut text = match (&self.name, &self.message) {
            (Some(name), Some(message)) => format!("{}: {}", name, message),
            (Some(name), None) => name.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => return None,
        };
        if let Some(debug_id) = &self.debug_id {
            text.push_str(&format!(" (debug_id: {})", debug_id));
        }
        Some(text)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Orders
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct CreateOrderBody {
    pub intent: &'static str,
    pub purchase_units: Vec<PurchaseUnitBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_context: Option<ApplicationContextBody>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseUnitBody {
    pub amount: AmountBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationContextBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

impl From<&OrderRequest> for CreateOrderBody {
    fn from(request: &OrderRequest) -> Self {
        let custom_id = request.metadata.as_ref().map(|metadata| {
            let raw = match metadata {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            raw.chars().take(CUSTOM_ID_MAX_CHARS).collect()
        });

        let application_context = if request.return_url.is_some() || request.cancel_url.is_some()
        {
            Some(ApplicationContextBody {
                return_url: request.return_url.clone(),
                cancel_url: request.cancel_url.clone(),
            })
        } else {
            None
        };

        Self {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnitBody {
                amount: AmountBody::from(&request.amount),
                description: request.description.clone(),
                custom_id,
            }],
            application_context,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderResponse {
    pub id: Option<String>,
    pub status: Option<String>,
    pub links: Vec<Link>,
    pub payer: Option<PayerBody>,
    pub purchase_units: Vec<PurchaseUnitResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PayerBody {
    pub email_address: Option<String>,
    pub name: Option<PayerNameBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PayerNameBody {
    pub given_name: Option<String>,
    pub surname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PurchaseUnitResponse {
    pub amount: Option<ProviderAmount>,
    pub payments: Option<PaymentsResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentsResponse {
    pub captures: Vec<CaptureResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CaptureResponse {
    pub id: Option<String>,
    pub status: Option<String>,
    pub amount: Option<ProviderAmount>,
}

impl From<PayerBody> for Payer {
    fn from(body: PayerBody) -> Self {
        let name = body.name.unwrap_or_default();
        Payer {
            email: body.email_address,
            given_name: name.given_name,
            surname: name.surname,
        }
    }
}

impl OrderResponse {
    /// Converts to the domain result; fails when the provider sent no usable id.
    pub fn into_result(self) -> Result<OrderResult, PaymentError> {
        let raw_id = self.id.unwrap_or_default();
        let provider_id = OrderId::new(&raw_id).map_err(|_| {
            PaymentError::provider_message("PayPal response did not contain an order id")
        })?;

        let first_unit = self.purchase_units.into_iter().next().unwrap_or_default();
        let first_capture = first_unit
            .payments
            .and_then(|payments| payments.captures.into_iter().next());

        let capture_id = first_capture
            .as_ref()
            .and_then(|capture| capture.id.as_deref())
            .and_then(|id| CaptureId::new(id).ok());

        let amount = first_capture
            .and_then(|capture| capture.amount)
            .or(first_unit.amount)
            .and_then(|amount| amount.to_money());

        Ok(OrderResult {
            provider_id,
            status: OrderStatus::from(self.status.unwrap_or_default()),
            links: self.links,
            capture_id,
            payer: self.payer.map(Payer::from),
            amount,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Refunds
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct RefundBody {
    pub amount: AmountBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_to_payer: Option<String>,
}

impl From<&RefundRequest> for RefundBody {
    fn from(request: &RefundRequest) -> Self {
        Self {
            amount: AmountBody::from(&request.amount),
            note_to_payer: request.note.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefundResponse {
    pub id: Option<String>,
    pub status: Option<String>,
    pub links: Vec<Link>,
}

impl RefundResponse {
    pub fn into_result(self) -> Result<RefundResult, PaymentError> {
        let refund_id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                PaymentError::provider_message("PayPal response did not contain a refund id")
            })?;

        Ok(RefundResult {
            refund_id,
            status: RefundStatus::from(self.status.unwrap_or_default()),
            links: self.links,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Invoicing (payment links)
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct InvoiceBody {
    pub detail: InvoiceDetailBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub primary_recipients: Vec<RecipientBody>,
    pub items: Vec<InvoiceItemBody>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailBody {
    pub currency_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipientBody {
    pub billing_info: BillingInfoBody,
}

#[derive(Debug, Serialize)]
pub struct BillingInfoBody {
    pub email_address: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceItemBody {
    pub name: String,
    pub quantity: &'static str,
    pub unit_amount: AmountBody,
}

impl From<&PaymentLinkRequest> for InvoiceBody {
    fn from(request: &PaymentLinkRequest) -> Self {
        let primary_recipients = request
            .recipient_email
            .iter()
            .map(|email| RecipientBody {
                billing_info: BillingInfoBody {
                    email_address: email.clone(),
                },
            })
            .collect();

        Self {
            detail: InvoiceDetailBody {
                currency_code: request.amount.currency().to_string(),
                invoice_number: request.reference_id.clone(),
                note: request.description.clone(),
            },
            primary_recipients,
            items: vec![InvoiceItemBody {
                name: request
                    .description
                    .clone()
                    .unwrap_or_else(|| "Payment".to_string()),
                quantity: "1",
                unit_amount: AmountBody::from(&request.amount),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendInvoiceBody {
    pub send_to_recipient: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceResponse {
    pub id: Option<String>,
    pub status: Option<String>,
    pub detail: Option<InvoiceDetailResponse>,
    pub links: Vec<Link>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceDetailResponse {
    pub metadata: Option<InvoiceMetadataResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceMetadataResponse {
    pub recipient_view_url: Option<String>,
}

impl InvoiceResponse {
    /// The payer-facing URL, from the invoice metadata or its `payer-view` link.
    pub fn payer_view_url(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(|detail| detail.metadata.as_ref())
            .and_then(|metadata| metadata.recipient_view_url.clone())
            .or_else(|| {
                self.links
                    .iter()
                    .find(|link| link.rel == "payer-view")
                    .map(|link| link.href.clone())
            })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Webhook verification
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct VerifySignatureBody<'a> {
    pub transmission_id: &'a str,
    pub transmission_time: &'a str,
    pub cert_url: &'a str,
    pub auth_algo: &'a str,
    pub transmission_sig: &'a str,
    pub webhook_id: &'a str,
    /// The delivered event, forwarded byte for byte.
    pub webhook_event: &'a RawValue,
}

impl<'a> VerifySignatureBody<'a> {
    pub fn new(
        headers: &'a TransmissionHeaders,
        webhook_id: &'a str,
        event: &'a RawValue,
    ) -> Self {
        Self {
            transmission_id: &headers.transmission_id,
            transmission_time: &headers.transmission_time,
            cert_url: &headers.cert_url,
            auth_algo: &headers.auth_algo,
            transmission_sig: &headers.transmission_sig,
            webhook_id,
            webhook_event: event,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VerifySignatureResponse {
    #[serde(default)]
    pub verification_status: String,
}

impl VerifySignatureResponse {
    pub fn is_success(&self) -> bool {
        self.verification_status == "SUCCESS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CurrencyCode;
    use serde_json::json;

    fn usd(minor: i64) -> Money {
        Money::new(minor, CurrencyCode::new("USD").unwrap())
    }

    // ══════════════════════════════════════════════════════════════
    // Outbound bodies
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn create_order_body_renders_major_units() {
        let request = OrderRequest::new(usd(1000)).with_description("Coffee");
        let body = serde_json::to_value(CreateOrderBody::from(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "intent": "CAPTURE",
                "purchase_units": [{
                    "amount": {"currency_code": "USD", "value": "10.00"},
                    "description": "Coffee"
                }]
            })
        );
    }

    #[test]
    fn metadata_becomes_truncated_custom_id() {
        let long = "x".repeat(300);
        let request = OrderRequest::new(usd(100)).with_metadata(json!(long));
        let body = CreateOrderBody::from(&request);
        assert_eq!(
            body.purchase_units[0].custom_id.as_ref().map(|s| s.len()),
            Some(CUSTOM_ID_MAX_CHARS)
        );

        let request = OrderRequest::new(usd(100)).with_metadata(json!({"cart": 7}));
        let body = CreateOrderBody::from(&request);
        assert_eq!(body.purchase_units[0].custom_id.as_deref(), Some("{\"cart\":7}"));
    }

    #[test]
    fn redirect_urls_go_to_application_context() {
        let request = OrderRequest::new(usd(100)).with_return_url("https://shop/return");
        let body = serde_json::to_value(CreateOrderBody::from(&request)).unwrap();
        assert_eq!(
            body["application_context"],
            json!({"return_url": "https://shop/return"})
        );
    }

    #[test]
    fn refund_body_carries_note() {
        let request = RefundRequest {
            capture_id: CaptureId::new("CAP1").unwrap(),
            amount: usd(500),
            note: Some("Damaged".to_string()),
        };
        let body = serde_json::to_value(RefundBody::from(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "amount": {"currency_code": "USD", "value": "5.00"},
                "note_to_payer": "Damaged"
            })
        );
    }

    #[test]
    fn invoice_body_includes_recipient_when_present() {
        let request = PaymentLinkRequest {
            amount: usd(2500),
            description: None,
            reference_id: Some("INV-7".to_string()),
            recipient_email: Some("buyer@example.com".to_string()),
        };
        let body = serde_json::to_value(InvoiceBody::from(&request)).unwrap();

        assert_eq!(body["detail"]["invoice_number"], "INV-7");
        assert_eq!(
            body["primary_recipients"][0]["billing_info"]["email_address"],
            "buyer@example.com"
        );
        assert_eq!(body["items"][0]["name"], "Payment");
        assert_eq!(body["items"][0]["unit_amount"]["value"], "25.00");
    }

    // ══════════════════════════════════════════════════════════════
    // Inbound responses
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn captured_order_exposes_capture_and_payer() {
        let response: OrderResponse = serde_json::from_value(json!({
            "id": "O1",
            "status": "COMPLETED",
            "payer": {
                "email_address": "buyer@example.com",
                "name": {"given_name": "Ada", "surname": "Lovelace"}
            },
            "purchase_units": [{
                "payments": {"captures": [{
                    "id": "CAP1",
                    "status": "COMPLETED",
                    "amount": {"currency_code": "USD", "value": "10.00"}
                }]}
            }]
        }))
        .unwrap();

        let result = response.into_result().unwrap();

        assert_eq!(result.status, OrderStatus::Completed);
        assert_eq!(result.capture_id.unwrap().as_str(), "CAP1");
        assert_eq!(result.amount.unwrap().minor_units(), 1000);
        let payer = result.payer.unwrap();
        assert_eq!(payer.email.as_deref(), Some("buyer@example.com"));
        assert_eq!(payer.surname.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn order_without_captures_has_no_capture_id() {
        let response: OrderResponse =
            serde_json::from_value(json!({"id": "O1", "status": "CREATED"})).unwrap();
        let result = response.into_result().unwrap();
        assert!(result.capture_id.is_none());
        assert!(result.links.is_empty());
    }

    #[test]
    fn order_without_id_is_rejected() {
        let response: OrderResponse =
            serde_json::from_value(json!({"status": "CREATED"})).unwrap();
        assert!(matches!(
            response.into_result(),
            Err(PaymentError::Provider { status: None, .. })
        ));
    }

    #[test]
    fn refund_without_id_is_rejected() {
        let response = RefundResponse::default();
        let err = response.into_result().unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn error_body_is_folded() {
        let body: ProviderErrorBody = serde_json::from_value(json!({
            "name": "RESOURCE_NOT_FOUND",
            "message": "The specified resource does not exist.",
            "debug_id": "abc123"
        }))
        .unwrap();
        assert_eq!(
            body.describe().unwrap(),
            "RESOURCE_NOT_FOUND: The specified resource does not exist. (debug_id: abc123)"
        );
        assert_eq!(ProviderErrorBody::default().describe(), None);
    }

    #[test]
    fn invoice_prefers_metadata_view_url() {
        let response: InvoiceResponse = serde_json::from_value(json!({
            "id": "INV2-1",
            "status": "DRAFT",
            "detail": {"metadata": {"recipient_view_url": "https://paypal/invoice/p/1"}},
            "links": [{"rel": "payer-view", "href": "https://other"}]
        }))
        .unwrap();
        assert_eq!(
            response.payer_view_url().as_deref(),
            Some("https://paypal/invoice/p/1")
        );
    }

    #[test]
    fn verification_requires_success_literal() {
        let ok: VerifySignatureResponse =
            serde_json::from_value(json!({"verification_status": "SUCCESS"})).unwrap();
        let failed: VerifySignatureResponse =
            serde_json::from_value(json!({"verification_status": "FAILURE"})).unwrap();
        assert!(ok.is_success());
        assert!(!failed.is_success());
    }
}
