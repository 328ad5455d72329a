use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    account::AccountId,
    error::{Denial, LedgerError},
    event::LedgerEvent,
    transaction::{TransactionId, TransactionRecord},
};

/// Small, bounded, append-only set of approvers, kept in approval order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverSet {
    members: Vec<AccountId>,
    capacity: usize,
}

impl ApproverSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn contains(&self, signer: &AccountId) -> bool {
        self.members.iter().any(|member| member == signer)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountId> {
        self.members.iter()
    }

    fn push(&mut self, signer: AccountId) {
        debug_assert!(!self.is_full() && !self.contains(&signer));
        self.members.push(signer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSigRequest {
    pub id: TransactionId,
    pub approvers: ApproverSet,
    pub required: usize,
}

impl MultiSigRequest {
    pub fn new(id: TransactionId, required: usize, capacity: usize) -> Self {
        Self {
            id,
            approvers: ApproverSet::with_capacity(capacity),
            required,
        }
    }

    pub fn has_quorum(&self) -> bool {
        self.approvers.len() >= self.required
    }

    /// Checks that `signer` may be added. Returns whether the quorum is
    /// reached once it is.
    pub fn check_approval(&self, signer: &AccountId) -> Result<bool, LedgerError> {
        if self.approvers.contains(signer) {
            return Err(LedgerError::NotAuthorized(Denial::DuplicateApprover));
        }
        if self.approvers.is_full() {
            return Err(LedgerError::ApproverCapacityExceeded {
                id: self.id,
                capacity: self.approvers.capacity(),
            });
        }
        Ok(self.approvers.len() + 1 >= self.required)
    }
}

/// Result of validating an approval.
#[derive(Debug)]
pub struct ApprovalCheck {
    pub event: LedgerEvent,
    pub quorum_reached: bool,
}

/// Approver sets of every transaction that required them. Requests are
/// kept after settlement.
#[derive(Debug, Default, Clone)]
pub struct MultiSigCoordinator {
    requests: HashMap<TransactionId, MultiSigRequest>,
}

impl MultiSigCoordinator {
    pub fn get(&self, id: TransactionId) -> Option<&MultiSigRequest> {
        self.requests.get(&id)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// `record` must still be pending, see
    /// [`TransactionRegistry::pending`](crate::transaction::TransactionRegistry::pending).
    pub fn handle_approval(
        &self,
        record: &TransactionRecord,
        signer: &AccountId,
    ) -> Result<ApprovalCheck, LedgerError> {
        let request = match self.requests.get(&record.id) {
            Some(request) if record.requires_multisig => request,
            _ => return Err(LedgerError::NotAuthorized(Denial::NotMultiSig)),
        };
        let quorum_reached = request.check_approval(signer)?;
        Ok(ApprovalCheck {
            event: LedgerEvent::ApprovalRecorded {
                id: record.id,
                signer: signer.clone(),
            },
            quorum_reached,
        })
    }

    pub(crate) fn insert(&mut self, request: MultiSigRequest) {
        self.requests.insert(request.id, request);
    }

    pub(crate) fn record_approval(&mut self, id: TransactionId, signer: &AccountId) {
        if let Some(request) = self.requests.get_mut(&id) {
            request.approvers.push(signer.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::transaction::TransactionRegistry;

    use super::*;

    fn multisig_record(amount: u128) -> TransactionRecord {
        TransactionRegistry::default().draft(&"alice".into(), &"bob".into(), amount, 0, 1_000_000)
    }

    #[test]
    fn approver_set_is_bounded_and_unique() {
        let mut request = MultiSigRequest::new(3, 10, 2);
        let carol = AccountId::from("carol");
        let dave = AccountId::from("dave");

        assert!(!request.check_approval(&carol).unwrap());
        request.approvers.push(carol.clone());
        assert_eq!(
            request.check_approval(&carol).unwrap_err(),
            LedgerError::NotAuthorized(Denial::DuplicateApprover)
        );
        request.approvers.push(dave);
        assert!(request.approvers.is_full());

        let err = request.check_approval(&"erin".into()).unwrap_err();
        assert_eq!(err, LedgerError::ApproverCapacityExceeded { id: 3, capacity: 2 });
        let order: Vec<_> = request.approvers.iter().map(AccountId::as_str).collect();
        assert_eq!(order, vec!["carol", "dave"]);
    }

    #[test]
    fn handle_approval() {
        let record = multisig_record(1_500_000);
        let mut coordinator = MultiSigCoordinator::default();
        coordinator.insert(MultiSigRequest::new(record.id, 2, 10));

        let carol = AccountId::from("carol");
        let check = coordinator.handle_approval(&record, &carol).unwrap();
        assert!(!check.quorum_reached);
        assert_eq!(
            check.event,
            LedgerEvent::ApprovalRecorded {
                id: record.id,
                signer: carol.clone()
            }
        );
        coordinator.record_approval(record.id, &carol);

        let err = coordinator.handle_approval(&record, &carol).unwrap_err();
        assert_eq!(err, LedgerError::NotAuthorized(Denial::DuplicateApprover));

        let check = coordinator.handle_approval(&record, &"dave".into()).unwrap();
        assert!(check.quorum_reached);
        // nothing recorded until the caller applies the event
        assert_eq!(coordinator.get(record.id).unwrap().approvers.len(), 1);
    }

    #[test]
    fn approval_requires_multisig_transaction() {
        let record = multisig_record(10);
        let coordinator = MultiSigCoordinator::default();
        let err = coordinator
            .handle_approval(&record, &"carol".into())
            .unwrap_err();
        assert_eq!(err, LedgerError::NotAuthorized(Denial::NotMultiSig));
    }
}
