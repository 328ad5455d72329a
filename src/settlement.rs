use crate::{
    account::Ledger,
    error::LedgerError,
    event::LedgerEvent,
    transaction::{Timestamp, TransactionRecord},
};

/// Validates settling `record` at `now` against the current balances.
///
/// The initiator balance is checked again here, whatever was checked at
/// creation time: balances may have moved since.
pub fn handle_settlement(
    ledger: &Ledger,
    record: &TransactionRecord,
    now: Timestamp,
) -> Result<LedgerEvent, LedgerError> {
    if !record.is_pending() {
        return Err(LedgerError::AlreadyCompleted { id: record.id });
    }
    ledger.ensure_funds(&record.initiator, record.amount)?;
    ledger.ensure_credit(&record.recipient, record.amount)?;
    Ok(LedgerEvent::Settled {
        id: record.id,
        initiator: record.initiator.clone(),
        recipient: record.recipient.clone(),
        amount: record.amount,
        completed_at: now,
    })
}
