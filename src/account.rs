use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{error::LedgerError, event::LedgerEvent};

/// Quantity of the native currency, in its smallest unit.
pub type Amount = u128;

/// Opaque account identity. Only equality and ordering are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Balances of every account that ever received value.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    balances: HashMap<AccountId, Amount>,
}

impl Ledger {
    /// Unknown holders have a zero balance.
    pub fn balance_of(&self, holder: &AccountId) -> Amount {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, Amount)> {
        self.balances.iter().map(|(holder, balance)| (holder, *balance))
    }

    /// `None` when the sum of all balances does not fit in [`Amount`].
    pub fn total_balance(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(0 as Amount, |total, balance| total.checked_add(*balance))
    }

    /// `amount` is what the custody layer actually received for `holder`.
    pub fn handle_deposit(
        &self,
        holder: &AccountId,
        amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        self.ensure_credit(holder, amount)?;
        Ok(LedgerEvent::Deposited {
            holder: holder.clone(),
            amount,
        })
    }

    pub fn ensure_funds(&self, holder: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balance_of(holder);
        if balance >= amount {
            Ok(())
        } else {
            Err(LedgerError::InsufficientBalance {
                account: holder.clone(),
                balance,
                required: amount,
            })
        }
    }

    pub fn ensure_credit(&self, holder: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        match self.balance_of(holder).checked_add(amount) {
            Some(_) => Ok(()),
            None => Err(LedgerError::BalanceOverflow {
                account: holder.clone(),
            }),
        }
    }

    // debit and credit trust the caller, the event was validated before
    pub(crate) fn credit(&mut self, holder: &AccountId, amount: Amount) {
        *self.balances.entry(holder.clone()).or_default() += amount;
    }

    pub(crate) fn debit(&mut self, holder: &AccountId, amount: Amount) {
        *self.balances.entry(holder.clone()).or_default() -= amount;
    }
}
