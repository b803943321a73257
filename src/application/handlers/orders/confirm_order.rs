//! ConfirmOrderHandler - Captures an approved order.

use std::sync::Arc;

use crate::domain::foundation::OrderId;
use crate::domain::payment::{OrderResult, PaymentError};
use crate::ports::PaymentProvider;

#[derive(Debug, Clone)]
pub struct ConfirmOrderCommand {
    pub order_id: String,
}

pub struct ConfirmOrderHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl ConfirmOrderHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: ConfirmOrderCommand) -> Result<OrderResult, PaymentError> {
        let order_id = OrderId::new(&cmd.order_id)?;
        self.provider.confirm_order(&order_id).await
    }
}
