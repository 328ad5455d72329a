use std::fmt;

use thiserror::Error;

use crate::{
    account::{AccountId, Amount},
    config::ConfigError,
    transaction::TransactionId,
};

/// Why a caller was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    Paused,
    NotAdministrator,
    NotMultiSig,
    DuplicateApprover,
    DirectExecutionDisabled,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Denial::Paused => "transaction creation is paused",
            Denial::NotAdministrator => "caller is not the administrator",
            Denial::NotMultiSig => "transaction does not require approvals",
            Denial::DuplicateApprover => "signer has already approved",
            Denial::DirectExecutionDisabled => {
                "transaction must be settled through approvals"
            }
        };
        f.write_str(reason)
    }
}

/// Every rejection a ledger operation can produce. A rejected operation
/// leaves the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Not authorized: {0}")]
    NotAuthorized(Denial),
    #[error("Insufficient balance for {account}: has {balance}, needs {required}")]
    InsufficientBalance {
        account: AccountId,
        balance: Amount,
        required: Amount,
    },
    #[error("Amount must be positive")]
    InvalidAmount,
    #[error("Transaction {id} not found")]
    TransactionNotFound { id: TransactionId },
    #[error("Transaction {id} is already completed")]
    AlreadyCompleted { id: TransactionId },
    #[error("Recipient must differ from the initiator")]
    InvalidRecipient,
    #[error("Transaction identifier {id} is reserved")]
    InvalidIdentifier { id: TransactionId },
    #[error("Transaction {id} cannot take more than {capacity} approvers")]
    ApproverCapacityExceeded { id: TransactionId, capacity: usize },
    #[error("Balance of {account} would overflow")]
    BalanceOverflow { account: AccountId },
}

/// Why a journaled event cannot be applied to the ledger it is replayed on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error(transparent)]
    Rejected(#[from] LedgerError),
    #[error("Expected transaction {expected}, found {found}")]
    OutOfOrder {
        expected: TransactionId,
        found: TransactionId,
    },
    #[error("Event does not match the ledger: {0}")]
    Mismatch(&'static str),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Journal event {index} cannot be replayed: {source}")]
    Event { index: usize, source: EventError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            LedgerError::NotAuthorized(Denial::Paused).to_string(),
            "Not authorized: transaction creation is paused"
        );
        assert_eq!(
            LedgerError::InsufficientBalance {
                account: AccountId::from("alice"),
                balance: 500,
                required: 1000,
            }
            .to_string(),
            "Insufficient balance for alice: has 500, needs 1000"
        );
    }
}
