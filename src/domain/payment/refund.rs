//! Refund types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CaptureId, Money};

use super::Link;

/// A request to refund (part of) a capture.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundRequest {
    pub capture_id: CaptureId,
    pub amount: Money,
    /// Shown to the payer; PayPal's `note_to_payer`.
    pub note: Option<String>,
}

/// Refund status as reported by PayPal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RefundStatus {
    Cancelled,
    Failed,
    Pending,
    Completed,
    Unknown(String),
}

impl RefundStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RefundStatus::Cancelled => "CANCELLED",
            RefundStatus::Failed => "FAILED",
            RefundStatus::Pending => "PENDING",
            RefundStatus::Completed => "COMPLETED",
            RefundStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for RefundStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "CANCELLED" => RefundStatus::Cancelled,
            "FAILED" => RefundStatus::Failed,
            "PENDING" => RefundStatus::Pending,
            "COMPLETED" => RefundStatus::Completed,
            _ => RefundStatus::Unknown(raw),
        }
    }
}

impl From<RefundStatus> for String {
    fn from(status: RefundStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Refund as created by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundResult {
    pub refund_id: String,
    pub status: RefundStatus,
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refund_status_round_trips_known_values() {
        for raw in ["CANCELLED", "FAILED", "PENDING", "COMPLETED"] {
            assert_eq!(RefundStatus::from(raw.to_string()).as_str(), raw);
        }
    }

    #[test]
    fn unknown_refund_status_is_kept() {
        assert_eq!(
            RefundStatus::from("ON_HOLD".to_string()),
            RefundStatus::Unknown("ON_HOLD".to_string())
        );
    }
}
