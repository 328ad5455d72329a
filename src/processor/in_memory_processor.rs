use tracing::{debug, info};

use crate::{
    account::{AccountId, Amount},
    config::{ConfigError, LedgerConfig},
    error::{LedgerError, ReplayError},
    event::LedgerEvent,
    multisig::MultiSigRequest,
    state::LedgerState,
    transaction::{TransactionId, TransactionRecord},
};

use super::{ApprovalOutcome, CallContext, LedgerProcessor};

#[derive(Debug)]
pub struct InMemoryLedgerProcessor {
    config: LedgerConfig,
    state: LedgerState,
    journal: Vec<LedgerEvent>,
}

impl InMemoryLedgerProcessor {
    pub fn new(config: LedgerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = LedgerState::new(config.administrator.clone());
        Ok(Self {
            config,
            state,
            journal: Vec::new(),
        })
    }

    /// Rebuilds a processor by applying a journal, in order, to a fresh
    /// ledger. Every event is checked against the state built so far, the
    /// first one that does not fit aborts the replay.
    pub fn replay(
        config: LedgerConfig,
        events: impl IntoIterator<Item = LedgerEvent>,
    ) -> Result<Self, ReplayError> {
        let mut processor = Self::new(config)?;
        for (index, event) in events.into_iter().enumerate() {
            processor
                .state
                .check_event(&processor.config, &event)
                .map_err(|source| ReplayError::Event { index, source })?;
            processor.commit([event]);
        }
        Ok(processor)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Every event applied so far, oldest first.
    pub fn journal(&self) -> &[LedgerEvent] {
        &self.journal
    }

    fn commit(&mut self, events: impl IntoIterator<Item = LedgerEvent>) {
        for event in events {
            self.state.apply(&event);
            self.journal.push(event);
        }
    }
}

impl LedgerProcessor for InMemoryLedgerProcessor {
    fn deposit(&mut self, ctx: &CallContext, amount: Amount) -> Result<Amount, LedgerError> {
        let evt = self.state.ledger.handle_deposit(&ctx.sender, amount)?;
        self.commit([evt]);
        debug!(holder = %ctx.sender, amount, "deposit credited");
        Ok(amount)
    }

    fn create_transaction(
        &mut self,
        ctx: &CallContext,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<TransactionId, LedgerError> {
        let (record, multisig) = self.state.handle_create_transaction(
            &self.config,
            &ctx.sender,
            &recipient,
            amount,
            ctx.now,
        )?;
        let id = record.id;
        let requires_multisig = record.requires_multisig;
        self.commit([LedgerEvent::TransactionCreated { record, multisig }]);
        info!(
            id,
            initiator = %ctx.sender,
            %recipient,
            amount,
            requires_multisig,
            "transaction created"
        );
        Ok(id)
    }

    fn approve(
        &mut self,
        ctx: &CallContext,
        id: TransactionId,
    ) -> Result<ApprovalOutcome, LedgerError> {
        let events = self
            .state
            .handle_approval(&self.config, id, &ctx.sender, ctx.now)?;
        let settled = events
            .iter()
            .any(|evt| matches!(evt, LedgerEvent::Settled { .. }));
        self.commit(events);

        if settled {
            info!(id, signer = %ctx.sender, "quorum reached, transaction settled");
            return Ok(ApprovalOutcome::Settled);
        }
        let (approvals, required) = self
            .state
            .multisig
            .get(id)
            .map(|request| (request.approvers.len(), request.required))
            .unwrap_or_default();
        debug!(id, signer = %ctx.sender, approvals, required, "approval recorded");
        Ok(ApprovalOutcome::Recorded {
            approvals,
            required,
        })
    }

    fn execute(&mut self, ctx: &CallContext, id: TransactionId) -> Result<bool, LedgerError> {
        let evt = self.state.handle_execute(&self.config, id, ctx.now)?;
        self.commit([evt]);
        info!(id, caller = %ctx.sender, "transaction settled");
        Ok(true)
    }

    fn pause(&mut self, ctx: &CallContext) -> Result<bool, LedgerError> {
        let evt = self.state.guard.handle_set_paused(&ctx.sender, true)?;
        self.commit([evt]);
        info!("transaction creation paused");
        Ok(true)
    }

    fn unpause(&mut self, ctx: &CallContext) -> Result<bool, LedgerError> {
        let evt = self.state.guard.handle_set_paused(&ctx.sender, false)?;
        self.commit([evt]);
        info!("transaction creation resumed");
        Ok(true)
    }

    fn get_transaction(&self, id: TransactionId) -> Option<&TransactionRecord> {
        self.state.registry.get(id)
    }

    fn get_multisig_request(&self, id: TransactionId) -> Option<&MultiSigRequest> {
        self.state.multisig.get(id)
    }

    fn balance_of(&self, holder: &AccountId) -> Amount {
        self.state.ledger.balance_of(holder)
    }

    fn operational_status(&self) -> bool {
        !self.state.guard.is_paused()
    }
}
