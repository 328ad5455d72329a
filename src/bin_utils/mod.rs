//! Bootstraps [`escrow_ledger`](crate) inside the binary: reads operations
//! from CSV, feeds them to the processor and prints the final balances.

use std::io::{Read, Write};

use crate::{
    command::LedgerCommand,
    config::LedgerConfig,
    processor::{
        CallContext, LedgerProcessor, ProcessError, in_memory_processor::InMemoryLedgerProcessor,
    },
};
use anyhow::{Context, Result};
use csv_parser::CsvOperationParser;
use csv_printer::{Balance, print_balances};
use tracing::warn;

pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: LedgerConfig,
    pub error_printer: Box<dyn FnMut(u64, ProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    /// Returns the processor so callers can inspect the final state.
    pub fn run(mut self) -> Result<InMemoryLedgerProcessor> {
        let parser = CsvOperationParser::new(self.input);

        let mut processor =
            InMemoryLedgerProcessor::new(self.config).context("Invalid ledger configuration")?;

        for (line, row) in parser {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!(line, %err, "skipping unreadable row");
                    continue;
                }
            };
            let ctx = CallContext {
                sender: row.sender,
                now: row.height,
            };
            let result = LedgerCommand::parse_command(row.op, row.recipient, row.amount, row.tx)
                .map_err(ProcessError::from)
                .and_then(|command| processor.process(&ctx, command));
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        let mut balances: Vec<_> = processor
            .state()
            .ledger
            .accounts()
            .map(|(account, balance)| Balance {
                account: account.clone(),
                balance,
            })
            .collect();
        balances.sort_by(|a, b| a.account.cmp(&b.account));
        print_balances(self.output, balances.into_iter())?;

        Ok(processor)
    }
}
