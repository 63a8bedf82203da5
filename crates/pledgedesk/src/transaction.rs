//! Transaction API schema contracts.
//!
//! Data-transfer shapes produced and consumed by the platform's API layer.
//! These declare structure only: ledger behavior (fee computation, currency
//! conversion, payout execution) lives in the owning services.

mod schemas;
mod types;

pub use schemas::{
    PayoutCreate, PayoutEstimate, Transaction, TransactionDetails, TransactionEmbedded,
    TransactionExternalOrganization, TransactionIssue, TransactionIssueReward,
    TransactionOrder, TransactionOrganization, TransactionPledge, TransactionProduct,
    TransactionRepository, TransactionUser, TransactionsBalance, TransactionsSummary,
};
pub use types::{
    PlatformFeeType, PledgeState, Processor, SubscriptionRecurringInterval, TransactionType,
};
