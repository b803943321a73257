//! Payment link (shareable invoice) types.

use crate::domain::foundation::Money;

use super::Link;

/// Request for a shareable payment link, backed by a PayPal invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLinkRequest {
    pub amount: Money,
    pub description: Option<String>,
    /// Merchant reference, stored as the invoice number.
    pub reference_id: Option<String>,
    pub recipient_email: Option<String>,
}

/// A created payment link.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLink {
    pub invoice_id: String,
    pub status: String,
    /// Payer-facing URL, when the provider returned one.
    pub payment_link: Option<String>,
    pub links: Vec<Link>,
    /// Whether the provider acknowledged the invoice send step.
    ///
    /// A failed send does not fail link creation; the draft invoice exists
    /// either way.
    pub send_confirmed: bool,
}
