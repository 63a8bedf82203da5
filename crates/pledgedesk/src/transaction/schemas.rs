//! Nested transaction representations exposed over the API.
//!
//! Amounts are integer minor units (cents). Every transaction carries two
//! currency/amount pairs: the platform currency and the receiving account's
//! currency, supporting cross-currency settlement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::platform::Platform;

use super::types::{
    PlatformFeeType, PledgeState, Processor, SubscriptionRecurringInterval, TransactionType,
};

/// External organization as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionExternalOrganization {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub platform: Platform,
    pub name: String,
    pub avatar_url: String,
    pub is_personal: bool,
}

/// Repository as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRepository {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub platform: Platform,
    pub organization_id: Uuid,
    pub name: String,
}

/// User as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionUser {
    pub id: Uuid,
    pub public_name: String,
    pub avatar_url: String,
}

/// Issue as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionIssue {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub platform: Platform,
    pub organization_id: Uuid,
    pub repository_id: Uuid,
    pub number: i64,
    pub title: String,

    pub organization: TransactionExternalOrganization,
    pub repository: TransactionRepository,
}

/// Pledge as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPledge {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub state: PledgeState,
    pub issue: TransactionIssue,
}

/// Internal organization as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOrganization {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: String,
    pub slug: String,
    pub avatar_url: Option<String>,
}

/// Issue reward share as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionIssueReward {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub issue_id: Uuid,
    /// Share of the reward, in thousandths.
    pub share_thousands: i32,
}

/// Product as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionProduct {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: String,
    pub recurring_interval: Option<SubscriptionRecurringInterval>,
    pub organization_id: Option<Uuid>,
    pub organization: Option<TransactionOrganization>,
}

/// Order as embedded in transaction payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOrder {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub product: TransactionProduct,
    pub subscription_id: Option<Uuid>,
}

/// A transaction without its resolved relations, as it appears inside other
/// transactions' incurred lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEmbedded {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,

    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub processor: Option<Processor>,

    /// Platform currency and amount.
    pub currency: String,
    pub amount: i64,
    /// Receiving account currency and amount.
    pub account_currency: String,
    pub account_amount: i64,

    pub platform_fee_type: Option<PlatformFeeType>,

    /// Funding source: at most one of these is set.
    pub pledge_id: Option<Uuid>,
    pub issue_reward_id: Option<Uuid>,
    pub order_id: Option<Uuid>,

    /// Settlement chain references.
    pub payout_transaction_id: Option<Uuid>,
    pub incurred_by_transaction_id: Option<Uuid>,
}

/// A transaction with resolved relations and derived aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub embedded: TransactionEmbedded,

    pub pledge: Option<TransactionPledge>,
    pub issue_reward: Option<TransactionIssueReward>,
    pub order: Option<TransactionOrder>,

    /// Transactions this one incurred on the account (fees etc.).
    pub account_incurred_transactions: Vec<TransactionEmbedded>,

    /// Sum of the incurred transactions' amounts.
    pub incurred_amount: i64,
    /// Amount before incurred transactions.
    pub gross_amount: i64,
    /// Amount after incurred transactions.
    pub net_amount: i64,
}

impl Transaction {
    /// Recompute the derived aggregates from the incurred transaction list.
    pub fn derive_amounts(&mut self) {
        self.incurred_amount = self
            .account_incurred_transactions
            .iter()
            .map(|t| t.amount)
            .sum();
        self.gross_amount = self.embedded.amount;
        self.net_amount = self.gross_amount - self.incurred_amount;
    }

    /// Whether the derived aggregates are consistent with the incurred list.
    pub fn amounts_consistent(&self) -> bool {
        let incurred: i64 = self
            .account_incurred_transactions
            .iter()
            .map(|t| t.amount)
            .sum();
        self.incurred_amount == incurred
            && self.gross_amount == self.embedded.amount
            && self.net_amount == self.gross_amount - self.incurred_amount
    }
}

/// A transaction with the transactions that paid it resolved as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetails {
    #[serde(flatten)]
    pub transaction: Transaction,

    /// Transactions that paid this one (e.g. the balances behind a payout).
    pub paid_transactions: Vec<Transaction>,
}

/// A currency/amount pair in both platform and account currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsBalance {
    pub currency: String,
    pub amount: i64,
    pub account_currency: String,
    pub account_amount: i64,
}

/// Account-level summary: current balance and lifetime payouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsSummary {
    pub balance: TransactionsBalance,
    pub payout: TransactionsBalance,
}

/// Request body to create a payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutCreate {
    pub account_id: Uuid,
}

/// Estimated payout amounts for an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutEstimate {
    pub account_id: Uuid,
    pub gross_amount: i64,
    pub fees_amount: i64,
    pub net_amount: i64,
}
