//! Ledger configuration, fixed when the ledger is created.

use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{AccountId, Amount},
    transaction::Timestamp,
};

/// Amount at or above which a transaction collects approvals.
pub const MULTISIG_THRESHOLD: Amount = 1_000_000;
/// Distinct approvers needed to settle through approvals.
pub const REQUIRED_APPROVALS: usize = 2;
pub const MAX_APPROVERS: usize = 10;
/// Holding period, in time units, of an escrowed transfer.
/// No operation enforces it.
pub const ESCROW_PERIOD: Timestamp = 144;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one approval must be required")]
    NoApprovalsRequired,
    #[error("{required} required approvals do not fit in {capacity} approver slots")]
    ApprovalsExceedCapacity { required: usize, capacity: usize },
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    pub administrator: AccountId,
    #[serde(default = "default_multisig_threshold")]
    pub multisig_threshold: Amount,
    #[serde(default = "default_required_approvals")]
    pub required_approvals: usize,
    #[serde(default = "default_max_approvers")]
    pub max_approvers: usize,
    /// Rejects identifier 0 in `approve` and `execute` with
    /// `InvalidIdentifier`, even though the first transaction gets it.
    #[serde(default)]
    pub reserve_zero_identifier: bool,
    /// Lets `execute` settle a transaction that requires approvals.
    #[serde(default = "default_allow_direct_multisig_execution")]
    pub allow_direct_multisig_execution: bool,
}

fn default_multisig_threshold() -> Amount {
    MULTISIG_THRESHOLD
}

fn default_required_approvals() -> usize {
    REQUIRED_APPROVALS
}

fn default_max_approvers() -> usize {
    MAX_APPROVERS
}

fn default_allow_direct_multisig_execution() -> bool {
    true
}

impl LedgerConfig {
    pub fn new(administrator: AccountId) -> Self {
        Self {
            administrator,
            multisig_threshold: MULTISIG_THRESHOLD,
            required_approvals: REQUIRED_APPROVALS,
            max_approvers: MAX_APPROVERS,
            reserve_zero_identifier: false,
            allow_direct_multisig_execution: true,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_approvals == 0 {
            return Err(ConfigError::NoApprovalsRequired);
        }
        if self.required_approvals > self.max_approvers {
            return Err(ConfigError::ApprovalsExceedCapacity {
                required: self.required_approvals,
                capacity: self.max_approvers,
            });
        }
        Ok(())
    }
}
