use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    account::{AccountId, Amount},
    error::LedgerError,
};

pub type TransactionId = u64;

/// Opaque, non-decreasing point in time supplied by the environment
/// (block height, logical clock, ...).
pub type Timestamp = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub initiator: AccountId,
    pub recipient: AccountId,
    pub amount: Amount,
    pub status: TransactionStatus,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    /// Fixed at creation, `amount >= threshold`.
    pub requires_multisig: bool,
}

impl TransactionRecord {
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }
}

/// Every transaction ever created, keyed by identifier. Records are never
/// removed, identifiers are handed out in creation order starting at 0.
#[derive(Debug, Default, Clone)]
pub struct TransactionRegistry {
    records: BTreeMap<TransactionId, TransactionRecord>,
    next_id: TransactionId,
}

impl TransactionRegistry {
    pub fn get(&self, id: TransactionId) -> Option<&TransactionRecord> {
        self.records.get(&id)
    }

    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in identifier order.
    pub fn records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.values()
    }

    /// Looks up a transaction that can still be approved or settled.
    pub fn pending(&self, id: TransactionId) -> Result<&TransactionRecord, LedgerError> {
        let record = self
            .records
            .get(&id)
            .ok_or(LedgerError::TransactionNotFound { id })?;
        if record.is_pending() {
            Ok(record)
        } else {
            Err(LedgerError::AlreadyCompleted { id })
        }
    }

    /// Builds the record the next created transaction would get.
    /// Validation of the arguments is up to the caller.
    pub fn draft(
        &self,
        initiator: &AccountId,
        recipient: &AccountId,
        amount: Amount,
        now: Timestamp,
        multisig_threshold: Amount,
    ) -> TransactionRecord {
        TransactionRecord {
            id: self.next_id,
            initiator: initiator.clone(),
            recipient: recipient.clone(),
            amount,
            status: TransactionStatus::Pending,
            created_at: now,
            completed_at: None,
            requires_multisig: amount >= multisig_threshold,
        }
    }

    pub(crate) fn insert(&mut self, record: TransactionRecord) {
        debug_assert_eq!(record.id, self.next_id, "identifiers must not skip");
        self.next_id = record.id + 1;
        self.records.insert(record.id, record);
    }

    pub(crate) fn complete(&mut self, id: TransactionId, completed_at: Timestamp) {
        if let Some(record) = self.records.get_mut(&id) {
            record.status = TransactionStatus::Completed;
            record.completed_at = Some(completed_at);
        }
    }
}
