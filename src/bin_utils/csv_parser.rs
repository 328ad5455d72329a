use std::io::Read;

use crate::{
    account::AccountId,
    command::OperationKind,
    transaction::{Timestamp, TransactionId},
};
use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    pub op: OperationKind,
    pub sender: AccountId,
    pub height: Timestamp,
    pub recipient: Option<AccountId>,
    pub amount: Option<i128>,
    pub tx: Option<TransactionId>,
}

/// Parses an operation list in CSV format
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_operations() {
        let input = "op, sender, height, recipient, amount, tx\n\
                     deposit, alice, 1, , 100,\n\
                     transfer, alice, 2, bob, 40,\n\
                     approve, carol, 3, , , 0\n\
                     pause, admin, 4\n\
                     refund, alice, 5, , , \n";
        let rows: Vec<_> = CsvOperationParser::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 5);

        let (_, deposit) = &rows[0];
        let deposit = deposit.as_ref().unwrap();
        assert_eq!(deposit.op, OperationKind::Deposit);
        assert_eq!(deposit.sender, AccountId::from("alice"));
        assert_eq!(deposit.amount, Some(100));
        assert_eq!(deposit.recipient, None);

        let transfer = rows[1].1.as_ref().unwrap();
        assert_eq!(transfer.recipient, Some(AccountId::from("bob")));

        let approve = rows[2].1.as_ref().unwrap();
        assert_eq!(approve.tx, Some(0));
        assert_eq!(approve.height, 3);

        let pause = rows[3].1.as_ref().unwrap();
        assert_eq!(pause.op, OperationKind::Pause);
        assert_eq!(pause.tx, None);

        assert!(rows[4].1.is_err());
    }
}
