use std::io::Write;

use crate::account::{AccountId, Amount};
use csv::Writer;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Balance {
    pub account: AccountId,
    pub balance: Amount,
}

pub fn print_balances<W>(
    output: &mut W,
    balances: impl Iterator<Item = Balance>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for balance in balances {
        if let Err(err) = writer.serialize(balance) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_header_and_rows() {
        let mut output = Vec::new();
        print_balances(
            &mut output,
            [
                Balance {
                    account: "x".into(),
                    balance: 500_000,
                },
                Balance {
                    account: "y".into(),
                    balance: 0,
                },
            ]
            .into_iter(),
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,balance\nx,500000\ny,0\n"
        );
    }
}
