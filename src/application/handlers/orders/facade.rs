//! OrderFacade - Single entry point for synchronous order operations.
//!
//! Validates caller input before any provider call and routes each
//! operation to its handler.

use std::sync::Arc;

use crate::domain::payment::{CancelOutcome, OrderResult, PaymentError, PaymentLink, RefundResult};
use crate::ports::PaymentProvider;

use super::{
    CancelOrderCommand, CancelOrderHandler, ConfirmOrderCommand, ConfirmOrderHandler,
    CreateOrderCommand, CreateOrderHandler, CreatePaymentLinkCommand, CreatePaymentLinkHandler,
    GetOrderStatusHandler, GetOrderStatusQuery, RefundPaymentCommand, RefundPaymentHandler,
};

#[derive(Clone)]
pub struct OrderFacade {
    provider: Arc<dyn PaymentProvider>,
}

impl OrderFacade {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn create_order(&self, cmd: CreateOrderCommand) -> Result<OrderResult, PaymentError> {
        CreateOrderHandler::new(self.provider.clone()).handle(cmd).await
    }

    pub async fn confirm_order(&self, order_id: impl Into<String>) -> Result<OrderResult, PaymentError> {
        ConfirmOrderHandler::new(self.provider.clone())
            .handle(ConfirmOrderCommand {
                order_id: order_id.into(),
            })
            .await
    }

    pub async fn get_order_status(
        &self,
        order_id: impl Into<String>,
    ) -> Result<OrderResult, PaymentError> {
        GetOrderStatusHandler::new(self.provider.clone())
            .handle(GetOrderStatusQuery {
                order_id: order_id.into(),
            })
            .await
    }

    /// Never calls the provider.
    pub async fn cancel_order(&self, order_id: impl Into<String>) -> Result<CancelOutcome, PaymentError> {
        CancelOrderHandler::new()
            .handle(CancelOrderCommand {
                order_id: order_id.into(),
            })
            .await
    }

    pub async fn refund_payment(&self, cmd: RefundPaymentCommand) -> Result<RefundResult, PaymentError> {
        RefundPaymentHandler::new(self.provider.clone()).handle(cmd).await
    }

    pub async fn create_payment_link(
        &self,
        cmd: CreatePaymentLinkCommand,
    ) -> Result<PaymentLink, PaymentError> {
        CreatePaymentLinkHandler::new(self.provider.clone()).handle(cmd).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::paypal::MockPaymentProvider;
    use crate::domain::foundation::OrderId;
    use crate::domain::payment::OrderStatus;

    fn facade() -> (OrderFacade, MockPaymentProvider) {
        let mock = MockPaymentProvider::new();
        (OrderFacade::new(Arc::new(mock.clone())), mock)
    }

    #[tokio::test]
    async fn cancel_makes_zero_provider_calls() {
        let (facade, mock) = facade();

        let outcome = facade.cancel_order("O1").await.unwrap();

        assert_eq!(outcome.order_id.as_str(), "O1");
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn order_lifecycle_through_facade() {
        let (facade, mock) = facade();

        let created = facade
            .create_order(CreateOrderCommand {
                amount: Some(1000),
                currency: Some("USD".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        mock.add_order(OrderResult::new(created.provider_id.clone(), OrderStatus::Approved));

        let confirmed = facade.confirm_order(created.provider_id.to_string()).await.unwrap();
        let status = facade.get_order_status(created.provider_id.to_string()).await.unwrap();

        assert_eq!(confirmed.status, OrderStatus::Completed);
        assert_eq!(status.capture_id, confirmed.capture_id);
        assert_eq!(mock.call_count("create_order"), 1);
        assert_eq!(mock.call_count("confirm_order"), 1);
    }

    #[tokio::test]
    async fn status_of_unknown_order_is_not_found() {
        let (facade, _) = facade();
        let err = facade
            .get_order_status(OrderId::new("X1").unwrap().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::NotFound(_)));
    }
}
