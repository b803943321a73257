//! CreateOrderHandler - Command handler for creating checkout orders.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::payment::{OrderRequest, OrderResult, PaymentError};
use crate::ports::PaymentProvider;

use super::validation::{non_blank, require_money};

/// Command to create a checkout order. Fields are raw caller input.
#[derive(Debug, Clone, Default)]
pub struct CreateOrderCommand {
    /// Amount in minor units.
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<Value>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
}

/// Handler for creating checkout orders.
pub struct CreateOrderHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl CreateOrderHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<OrderResult, PaymentError> {
        let amount = require_money(cmd.amount, cmd.currency.as_deref())?;

        let request = OrderRequest {
            amount,
            description: non_blank(cmd.description),
            metadata: cmd.metadata.filter(|m| !m.is_null()),
            return_url: non_blank(cmd.return_url),
            cancel_url: non_blank(cmd.cancel_url),
        };

        self.provider.create_order(request).await
    }
}
