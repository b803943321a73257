//! RefundPaymentHandler - Command handler for capture refunds.

use std::sync::Arc;

use crate::domain::foundation::CaptureId;
use crate::domain::payment::{PaymentError, RefundRequest, RefundResult};
use crate::ports::PaymentProvider;

use super::validation::{non_blank, require_money};

/// Command to refund a capture. Fields are raw caller input.
#[derive(Debug, Clone, Default)]
pub struct RefundPaymentCommand {
    pub capture_id: String,
    /// Amount in minor units.
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub note: Option<String>,
}

pub struct RefundPaymentHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl RefundPaymentHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: RefundPaymentCommand) -> Result<RefundResult, PaymentError> {
        let capture_id = CaptureId::new(&cmd.capture_id)?;
        let amount = require_money(cmd.amount, cmd.currency.as_deref())?;

        self.provider
            .refund_payment(RefundRequest {
                capture_id,
                amount,
                note: non_blank(cmd.note),
            })
            .await
    }
}
