//! Domain Value Objects

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::PaymentError;

/// How the customer pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[display("mtn")]
    Mtn,
    #[display("orange")]
    Orange,
    #[display("bank_transfer")]
    BankTransfer,
    #[display("credit_card")]
    CreditCard,
}

impl PaymentMethod {
    /// MTN and Orange are mobile money operators
    pub fn is_mobile_money(self) -> bool {
        matches!(self, PaymentMethod::Mtn | PaymentMethod::Orange)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Mtn => "mtn",
            PaymentMethod::Orange => "orange",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::CreditCard => "credit_card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mtn" => Ok(PaymentMethod::Mtn),
            "orange" => Ok(PaymentMethod::Orange),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "credit_card" => Ok(PaymentMethod::CreditCard),
            other => Err(PaymentError::Validation(format!(
                "Invalid payment method: {other}"
            ))),
        }
    }
}

/// Lifecycle of a payment intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[display("pending")]
    Pending,
    #[display("completed")]
    Completed,
    #[display("failed")]
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }

    /// `pending → completed` and `pending → failed` only
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        self == PaymentStatus::Pending && next.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(PaymentError::Validation(format!(
                "Invalid payment status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_money() {
        assert!(PaymentMethod::Mtn.is_mobile_money());
        assert!(PaymentMethod::Orange.is_mobile_money());
        assert!(!PaymentMethod::BankTransfer.is_mobile_money());
        assert!(!PaymentMethod::CreditCard.is_mobile_money());
    }

    #[test]
    fn test_wire_names_agree() {
        for method in [
            PaymentMethod::Mtn,
            PaymentMethod::Orange,
            PaymentMethod::BankTransfer,
            PaymentMethod::CreditCard,
        ] {
            let json = serde_json::to_value(method).unwrap();
            assert_eq!(json, method.as_str());
            assert_eq!(method.to_string(), method.as_str());
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_transitions() {
        use PaymentStatus::*;
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Pending));
    }
}
