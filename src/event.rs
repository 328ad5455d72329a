use serde::{Deserialize, Serialize};

use crate::{
    account::{AccountId, Amount},
    multisig::MultiSigRequest,
    transaction::{Timestamp, TransactionId, TransactionRecord},
};

/// A validated state change. Operations first collect events against the
/// current state and only then apply them, so a rejected operation never
/// leaves partial effects behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    Deposited {
        holder: AccountId,
        amount: Amount,
    },
    TransactionCreated {
        record: TransactionRecord,
        multisig: Option<MultiSigRequest>,
    },
    ApprovalRecorded {
        id: TransactionId,
        signer: AccountId,
    },
    Settled {
        id: TransactionId,
        initiator: AccountId,
        recipient: AccountId,
        amount: Amount,
        completed_at: Timestamp,
    },
    PauseSet {
        paused: bool,
    },
}
