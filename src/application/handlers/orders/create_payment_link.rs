//! CreatePaymentLinkHandler - Creates an invoice-backed payment link.

use std::sync::Arc;

use crate::domain::payment::{PaymentError, PaymentLink, PaymentLinkRequest};
use crate::ports::PaymentProvider;

use super::validation::{non_blank, require_money};

#[derive(Debug, Clone, Default)]
pub struct CreatePaymentLinkCommand {
    /// Amount in minor units.
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub reference_id: Option<String>,
    pub recipient_email: Option<String>,
}

pub struct CreatePaymentLinkHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl CreatePaymentLinkHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: CreatePaymentLinkCommand) -> Result<PaymentLink, PaymentError> {
        let amount = require_money(cmd.amount, cmd.currency.as_deref())?;

        let recipient_email = non_blank(cmd.recipient_email);
        if let Some(email) = &recipient_email {
            if !email.contains('@') {
                return Err(PaymentError::validation(
                    "recipient_email",
                    "Recipient email is not a valid address",
                ));
            }
        }

        self.provider
            .create_payment_link(PaymentLinkRequest {
                amount,
                description: non_blank(cmd.description),
                reference_id: non_blank(cmd.reference_id),
                recipient_email,
            })
            .await
    }
}
