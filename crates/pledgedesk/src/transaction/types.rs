//! Enumerations shared by the transaction schema contracts.

use serde::{Deserialize, Serialize};

/// Polymorphic type of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Funded by a pledge on an issue.
    Pledge,
    /// Funded by a product order.
    Order,
    /// Money moved out to the receiving account.
    Payout,
    /// A fee incurred by another transaction.
    Fee,
}

/// Payment processor a transaction went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Processor {
    Stripe,
    OpenCollective,
}

/// Kind of platform fee a fee transaction represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFeeType {
    Payment,
    InternationalPayment,
    Subscription,
    Invoice,
    CrossBorderTransfer,
    Payout,
    Account,
}

/// Lifecycle state of a pledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PledgeState {
    Initiated,
    Created,
    Pending,
    Refunded,
    Disputed,
    Cancelled,
}

/// Billing interval of a recurring product subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionRecurringInterval {
    Month,
    Year,
}
