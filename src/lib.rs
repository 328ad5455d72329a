/// Account identities and the balance ledger.
/// Balances only change by applying events, see [`event`].
pub mod account;

/// Transaction records, their lifecycle status and the registry that
/// hands out identifiers.
pub mod transaction;

/// Approver sets for transactions above the multi-signature threshold.
pub mod multisig;

/// Validation of a single settlement (debit, credit and completion).
pub mod settlement;

/// Administrator identity and the global pause flag.
pub mod admin;

/// Events produced by validated operations. Applying an event never fails.
pub mod event;

/// Single state object owning every component.
pub mod state;

pub mod config;

pub mod error;

/// Typed commands parsed from loosely typed operation rows.
pub mod command;

/// Ledger processor interface, plus "in memory" implementation.
/// Coordinates validation, event application and the journal.
pub mod processor;

/// Batch driver that replays CSV operations through the processor.
/// Lives in the library so integration tests can use it.
pub mod bin_utils;
