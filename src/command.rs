use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{AccountId, Amount},
    transaction::TransactionId,
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Deposit,
    Transfer,
    Approve,
    Execute,
    Pause,
    Unpause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Deposit { amount: Amount },
    CreateTransaction { recipient: AccountId, amount: Amount },
    Approve { id: TransactionId },
    Execute { id: TransactionId },
    Pause,
    Unpause,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Amount must not be negative for {kind:?}")]
    NegativeAmount { kind: OperationKind },
    #[error("Recipient is required for {kind:?}")]
    RecipientRequired { kind: OperationKind },
    #[error("Transaction id is required for {kind:?}")]
    TransactionRequired { kind: OperationKind },
}

impl LedgerCommand {
    /// Fields that the operation does not use are ignored.
    pub fn parse_command(
        kind: OperationKind,
        recipient: Option<AccountId>,
        amount: Option<i128>,
        tx: Option<TransactionId>,
    ) -> Result<Self, LedgerCommandError> {
        match kind {
            OperationKind::Deposit => Ok(Self::Deposit {
                amount: Self::parse_amount(kind, amount)?,
            }),
            OperationKind::Transfer => {
                let recipient =
                    recipient.ok_or(LedgerCommandError::RecipientRequired { kind })?;
                Ok(Self::CreateTransaction {
                    recipient,
                    amount: Self::parse_amount(kind, amount)?,
                })
            }
            OperationKind::Approve => Ok(Self::Approve {
                id: tx.ok_or(LedgerCommandError::TransactionRequired { kind })?,
            }),
            OperationKind::Execute => Ok(Self::Execute {
                id: tx.ok_or(LedgerCommandError::TransactionRequired { kind })?,
            }),
            OperationKind::Pause => Ok(Self::Pause),
            OperationKind::Unpause => Ok(Self::Unpause),
        }
    }

    // zero is a valid command here, the ledger rejects it
    fn parse_amount(
        kind: OperationKind,
        amount: Option<i128>,
    ) -> Result<Amount, LedgerCommandError> {
        let amount = amount.ok_or(LedgerCommandError::AmountRequired { kind })?;
        Amount::try_from(amount).map_err(|_| LedgerCommandError::NegativeAmount { kind })
    }
}
