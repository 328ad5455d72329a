use std::{cell::RefCell, rc::Rc, str::from_utf8};

use escrow_ledger::{
    bin_utils::Service,
    command::{LedgerCommandError, OperationKind},
    config::LedgerConfig,
    error::{Denial, LedgerError},
    event::LedgerEvent,
    processor::{LedgerProcessor, ProcessError, in_memory_processor::InMemoryLedgerProcessor},
    transaction::TransactionStatus,
};

const TEST_FILE: &str = include_str!("operations.csv");

#[test]
fn process_operations() {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let collected = Rc::clone(&errors);

    let mut output = Vec::new();
    let service = Service {
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        config: LedgerConfig::new("admin".into()),
        error_printer: Box::new(move |_line, err| collected.borrow_mut().push(err)),
    };
    let processor = service.run().unwrap();

    assert_eq!(
        from_utf8(&output).unwrap(),
        "account,balance\nw,1000500\nx,499990\ny,500010\n"
    );

    let errors = errors.borrow();
    let command_errors: Vec<_> = errors
        .iter()
        .filter_map(|err| match err {
            ProcessError::CommandErr(err) => Some(err),
            ProcessError::LedgerErr(_) => None,
        })
        .collect();
    assert_eq!(
        command_errors,
        vec![&LedgerCommandError::NegativeAmount {
            kind: OperationKind::Deposit
        }]
    );

    let ledger_errors: Vec<_> = errors
        .iter()
        .filter_map(|err| match err {
            ProcessError::LedgerErr(err) => Some(err.clone()),
            ProcessError::CommandErr(_) => None,
        })
        .collect();
    assert_eq!(ledger_errors.len(), 6);
    assert_eq!(ledger_errors[0], LedgerError::AlreadyCompleted { id: 0 });
    assert!(matches!(
        ledger_errors[1],
        LedgerError::InsufficientBalance { .. }
    ));
    assert_eq!(ledger_errors[2], LedgerError::NotAuthorized(Denial::Paused));
    assert_eq!(ledger_errors[3], LedgerError::InvalidRecipient);
    assert_eq!(
        ledger_errors[4],
        LedgerError::NotAuthorized(Denial::DuplicateApprover)
    );
    assert_eq!(ledger_errors[5], LedgerError::NotAuthorized(Denial::NotMultiSig));

    // identifiers are handed out without gaps, rejected transfers take none
    let ids: Vec<_> = processor.state().registry.records().map(|r| r.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(
        processor
            .state()
            .registry
            .records()
            .all(|r| r.status == TransactionStatus::Completed)
    );
    let large = processor.get_transaction(2).unwrap();
    assert!(large.requires_multisig);
    assert_eq!(large.completed_at, Some(16));
    assert!(processor.operational_status());
}

#[test]
fn journal_replays_to_same_state() {
    let mut output = Vec::new();
    let service = Service {
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        config: LedgerConfig::new("admin".into()),
        error_printer: Box::new(|_, _| {}),
    };
    let processor = service.run().unwrap();

    let encoded: Vec<String> = processor
        .journal()
        .iter()
        .map(|event| serde_json::to_string(event).unwrap())
        .collect();
    let decoded: Vec<LedgerEvent> = encoded
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let replayed =
        InMemoryLedgerProcessor::replay(processor.config().clone(), decoded).unwrap();
    for account in ["w", "x", "y"] {
        assert_eq!(
            replayed.balance_of(&account.into()),
            processor.balance_of(&account.into())
        );
    }
    for id in 0..3 {
        assert_eq!(replayed.get_transaction(id), processor.get_transaction(id));
    }
    assert_eq!(replayed.state().ledger.total_balance(), Some(2_000_500));
}
