use thiserror::Error;

use crate::{
    account::{AccountId, Amount},
    command::{LedgerCommand, LedgerCommandError},
    error::LedgerError,
    multisig::MultiSigRequest,
    transaction::{Timestamp, TransactionId, TransactionRecord},
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] LedgerCommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
}

/// Who is calling and when, as reported by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub sender: AccountId,
    pub now: Timestamp,
}

impl CallContext {
    pub fn new(sender: impl Into<AccountId>, now: Timestamp) -> Self {
        Self {
            sender: sender.into(),
            now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Approval stored, quorum not reached yet.
    Recorded { approvals: usize, required: usize },
    /// Approval completed the quorum and the transaction settled.
    Settled,
}

impl ApprovalOutcome {
    pub fn is_settled(&self) -> bool {
        matches!(self, ApprovalOutcome::Settled)
    }
}

/// Public operations of the ledger. Every mutating operation either
/// commits all of its effects or fails without any.
pub trait LedgerProcessor {
    /// Credits the caller with what the custody layer received.
    fn deposit(&mut self, ctx: &CallContext, amount: Amount) -> Result<Amount, LedgerError>;

    fn create_transaction(
        &mut self,
        ctx: &CallContext,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<TransactionId, LedgerError>;

    fn approve(
        &mut self,
        ctx: &CallContext,
        id: TransactionId,
    ) -> Result<ApprovalOutcome, LedgerError>;

    fn execute(&mut self, ctx: &CallContext, id: TransactionId) -> Result<bool, LedgerError>;

    fn pause(&mut self, ctx: &CallContext) -> Result<bool, LedgerError>;

    fn unpause(&mut self, ctx: &CallContext) -> Result<bool, LedgerError>;

    fn get_transaction(&self, id: TransactionId) -> Option<&TransactionRecord>;

    fn get_multisig_request(&self, id: TransactionId) -> Option<&MultiSigRequest>;

    fn balance_of(&self, holder: &AccountId) -> Amount;

    /// `false` while transaction creation is paused.
    fn operational_status(&self) -> bool;

    fn process(&mut self, ctx: &CallContext, command: LedgerCommand) -> Result<(), ProcessError> {
        match command {
            LedgerCommand::Deposit { amount } => {
                self.deposit(ctx, amount)?;
            }
            LedgerCommand::CreateTransaction { recipient, amount } => {
                self.create_transaction(ctx, recipient, amount)?;
            }
            LedgerCommand::Approve { id } => {
                self.approve(ctx, id)?;
            }
            LedgerCommand::Execute { id } => {
                self.execute(ctx, id)?;
            }
            LedgerCommand::Pause => {
                self.pause(ctx)?;
            }
            LedgerCommand::Unpause => {
                self.unpause(ctx)?;
            }
        };
        Ok(())
    }
}
