//! GetOrderStatusHandler - Query handler for order lookups.

use std::sync::Arc;

use crate::domain::foundation::OrderId;
use crate::domain::payment::{OrderResult, PaymentError};
use crate::ports::PaymentProvider;

#[derive(Debug, Clone)]
pub struct GetOrderStatusQuery {
    pub order_id: String,
}

pub struct GetOrderStatusHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl GetOrderStatusHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: GetOrderStatusQuery) -> Result<OrderResult, PaymentError> {
        let order_id = OrderId::new(&query.order_id)?;
        self.provider.get_order_status(&order_id).await
    }
}
