use crate::{
    account::AccountId,
    error::{Denial, LedgerError},
    event::LedgerEvent,
};

/// Holds the administrator, fixed at initialization, and the pause flag.
/// The flag only gates creation of new transactions.
#[derive(Debug, Clone)]
pub struct AdminGuard {
    administrator: AccountId,
    paused: bool,
}

impl AdminGuard {
    pub fn new(administrator: AccountId) -> Self {
        Self {
            administrator,
            paused: false,
        }
    }

    pub fn administrator(&self) -> &AccountId {
        &self.administrator
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ensure_operational(&self) -> Result<(), LedgerError> {
        if self.paused {
            Err(LedgerError::NotAuthorized(Denial::Paused))
        } else {
            Ok(())
        }
    }

    /// Setting the flag to its current value is accepted.
    pub fn handle_set_paused(
        &self,
        caller: &AccountId,
        paused: bool,
    ) -> Result<LedgerEvent, LedgerError> {
        if caller != &self.administrator {
            return Err(LedgerError::NotAuthorized(Denial::NotAdministrator));
        }
        Ok(LedgerEvent::PauseSet { paused })
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_administrator_toggles_pause() {
        let mut guard = AdminGuard::new("admin".into());
        assert!(guard.ensure_operational().is_ok());

        let err = guard
            .handle_set_paused(&"mallory".into(), true)
            .unwrap_err();
        assert_eq!(err, LedgerError::NotAuthorized(Denial::NotAdministrator));

        let evt = guard.handle_set_paused(&"admin".into(), true).unwrap();
        assert_eq!(evt, LedgerEvent::PauseSet { paused: true });
        guard.set_paused(true);
        assert!(guard.is_paused());
        assert_eq!(
            guard.ensure_operational().unwrap_err(),
            LedgerError::NotAuthorized(Denial::Paused)
        );

        // pausing twice is fine
        assert!(guard.handle_set_paused(&"admin".into(), true).is_ok());
    }
}
