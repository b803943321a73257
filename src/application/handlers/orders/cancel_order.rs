//! CancelOrderHandler - Acknowledges a cancel request without calling PayPal.
//!
//! PayPal has no cancel primitive for checkout orders; an unapproved order
//! simply expires. The handler therefore holds no provider at all.

use crate::domain::foundation::OrderId;
use crate::domain::payment::{CancelOutcome, PaymentError};

#[derive(Debug, Clone)]
pub struct CancelOrderCommand {
    pub order_id: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CancelOrderHandler;

impl CancelOrderHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, cmd: CancelOrderCommand) -> Result<CancelOutcome, PaymentError> {
        let order_id = OrderId::new(&cmd.order_id)?;

        tracing::info!(order_id = %order_id, "Order cancel requested; PayPal orders expire unapproved");

        Ok(CancelOutcome {
            message: format!(
                "Order {} marked as cancelled. PayPal does not support order cancellation; \
                 unapproved orders expire automatically.",
                order_id
            ),
            order_id,
        })
    }
}
