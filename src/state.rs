use crate::{
    account::{AccountId, Amount, Ledger},
    admin::AdminGuard,
    config::LedgerConfig,
    error::{Denial, EventError, LedgerError},
    event::LedgerEvent,
    multisig::{MultiSigCoordinator, MultiSigRequest},
    settlement::handle_settlement,
    transaction::{Timestamp, TransactionId, TransactionRecord, TransactionRegistry},
};

/// Everything the ledger knows. `handle_*` methods validate an operation
/// and return the events it would produce. Applying events is reserved to
/// the processor, so state only changes through a journaled operation.
#[derive(Debug, Clone)]
pub struct LedgerState {
    pub ledger: Ledger,
    pub registry: TransactionRegistry,
    pub multisig: MultiSigCoordinator,
    pub guard: AdminGuard,
}

impl LedgerState {
    pub fn new(administrator: AccountId) -> Self {
        Self {
            ledger: Ledger::default(),
            registry: TransactionRegistry::default(),
            multisig: MultiSigCoordinator::default(),
            guard: AdminGuard::new(administrator),
        }
    }

    /// Checks run in a fixed order, the first failing one is reported.
    /// Returns the record to create along with its approval request, if
    /// it needs one.
    pub fn handle_create_transaction(
        &self,
        config: &LedgerConfig,
        initiator: &AccountId,
        recipient: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> Result<(TransactionRecord, Option<MultiSigRequest>), LedgerError> {
        self.guard.ensure_operational()?;
        self.ledger.ensure_funds(initiator, amount)?;
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if recipient == initiator {
            return Err(LedgerError::InvalidRecipient);
        }

        let record = self
            .registry
            .draft(initiator, recipient, amount, now, config.multisig_threshold);
        let multisig = record.requires_multisig.then(|| {
            MultiSigRequest::new(record.id, config.required_approvals, config.max_approvers)
        });
        Ok((record, multisig))
    }

    /// Yields the recorded approval, followed by the settlement when the
    /// approval completes the quorum. If that settlement is not possible
    /// the approval is rejected as well.
    pub fn handle_approval(
        &self,
        config: &LedgerConfig,
        id: TransactionId,
        signer: &AccountId,
        now: Timestamp,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        check_identifier(config, id)?;
        let record = self.registry.pending(id)?;
        let check = self.multisig.handle_approval(record, signer)?;
        let mut events = vec![check.event];
        if check.quorum_reached {
            events.push(handle_settlement(&self.ledger, record, now)?);
        }
        Ok(events)
    }

    pub fn handle_execute(
        &self,
        config: &LedgerConfig,
        id: TransactionId,
        now: Timestamp,
    ) -> Result<LedgerEvent, LedgerError> {
        check_identifier(config, id)?;
        let record = self.registry.pending(id)?;
        if record.requires_multisig && !config.allow_direct_multisig_execution {
            return Err(LedgerError::NotAuthorized(Denial::DirectExecutionDisabled));
        }
        handle_settlement(&self.ledger, record, now)
    }

    /// Checks that a journaled event could have been produced by an
    /// operation against the current state. Used when replaying a journal,
    /// so policy checks that only gate callers (pause, direct execution,
    /// reserved identifiers) are not repeated.
    pub fn check_event(
        &self,
        config: &LedgerConfig,
        event: &LedgerEvent,
    ) -> Result<(), EventError> {
        match event {
            LedgerEvent::Deposited { holder, amount } => {
                self.ledger.handle_deposit(holder, *amount)?;
            }
            LedgerEvent::TransactionCreated { record, multisig } => {
                let expected = self.registry.next_id();
                if record.id != expected {
                    return Err(EventError::OutOfOrder {
                        expected,
                        found: record.id,
                    });
                }
                if !record.is_pending() || record.completed_at.is_some() {
                    return Err(EventError::Mismatch("created transaction is not pending"));
                }
                self.ledger.ensure_funds(&record.initiator, record.amount)?;
                if record.amount == 0 {
                    return Err(LedgerError::InvalidAmount.into());
                }
                if record.recipient == record.initiator {
                    return Err(LedgerError::InvalidRecipient.into());
                }
                if record.requires_multisig != (record.amount >= config.multisig_threshold) {
                    return Err(EventError::Mismatch("multi-signature flag"));
                }
                let expected = record.requires_multisig.then(|| {
                    MultiSigRequest::new(record.id, config.required_approvals, config.max_approvers)
                });
                if multisig != &expected {
                    return Err(EventError::Mismatch("approval request"));
                }
            }
            LedgerEvent::ApprovalRecorded { id, signer } => {
                let record = self.registry.pending(*id)?;
                self.multisig.handle_approval(record, signer)?;
            }
            LedgerEvent::Settled { id, completed_at, .. } => {
                let record = self.registry.pending(*id)?;
                if &handle_settlement(&self.ledger, record, *completed_at)? != event {
                    return Err(EventError::Mismatch("settlement differs from transaction"));
                }
            }
            LedgerEvent::PauseSet { .. } => {}
        }
        Ok(())
    }

    pub(crate) fn apply(&mut self, event: &LedgerEvent) {
        match event {
            LedgerEvent::Deposited { holder, amount } => {
                self.ledger.credit(holder, *amount);
            }
            LedgerEvent::TransactionCreated { record, multisig } => {
                self.registry.insert(record.clone());
                if let Some(request) = multisig {
                    self.multisig.insert(request.clone());
                }
            }
            LedgerEvent::ApprovalRecorded { id, signer } => {
                self.multisig.record_approval(*id, signer);
            }
            LedgerEvent::Settled {
                id,
                initiator,
                recipient,
                amount,
                completed_at,
            } => {
                self.ledger.debit(initiator, *amount);
                self.ledger.credit(recipient, *amount);
                self.registry.complete(*id, *completed_at);
            }
            LedgerEvent::PauseSet { paused } => {
                self.guard.set_paused(*paused);
            }
        }
    }
}

fn check_identifier(config: &LedgerConfig, id: TransactionId) -> Result<(), LedgerError> {
    if config.reserve_zero_identifier && id == 0 {
        Err(LedgerError::InvalidIdentifier { id })
    } else {
        Ok(())
    }
}
