//! Flattened one-row-per-transaction CSV:
//! Date,Time,Type,Description,Amount,Balance,CounterParty,Reference,Provider

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::Decimal;

use crate::error::StatementError;
use crate::model::{Statement, Transaction};
use crate::parsing::values::{canonical_date, canonical_time};

#[derive(serde::Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "CounterParty")]
    counterparty: &'a str,
    #[serde(rename = "Reference")]
    reference: &'a str,
    #[serde(rename = "Provider")]
    provider: String,
}

impl<'a> CsvRow<'a> {
    fn from_transaction(t: &'a Transaction) -> Self {
        CsvRow {
            date: canonical_date(t.occurred_on),
            time: canonical_time(t.occurred_at),
            kind: t.kind.to_string(),
            description: &t.description,
            amount: format_money(t.amount),
            balance: format_money(t.balance_after),
            counterparty: t.counterparty.as_deref().unwrap_or(""),
            reference: &t.reference,
            provider: t.provider.to_string(),
        }
    }
}

/// Render a money value with exactly two decimal places.
pub fn format_money(value: Decimal) -> String {
    let mut rounded = value;
    rounded.rescale(2);
    rounded.to_string()
}

/// Write every transaction as one CSV row, header first. Text columns are
/// always quoted.
pub fn write_csv<W: Write>(w: W, statement: &Statement) -> Result<(), StatementError> {
    let mut wrt = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(w);

    if statement.transactions.is_empty() {
        wrt.write_record([
            "Date",
            "Time",
            "Type",
            "Description",
            "Amount",
            "Balance",
            "CounterParty",
            "Reference",
            "Provider",
        ])?;
    }
    for t in &statement.transactions {
        wrt.serialize(CsvRow::from_transaction(t))?;
    }
    wrt.flush()?;
    Ok(())
}

pub fn to_csv_string(statement: &Statement) -> Result<String, StatementError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, statement)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// File name for a statement's CSV export:
/// `{provider}_MoMo_{account}_{from}_{to}.csv`.
pub fn suggested_filename(statement: &Statement) -> String {
    let account = statement.account_identifier.as_deref().unwrap_or("Unknown");
    let (from, to) = match statement.period {
        Some(p) => (canonical_date(p.from), canonical_date(p.to)),
        None => ("Unknown".to_string(), "Unknown".to_string()),
    };
    format!("{}_MoMo_{}_{}_{}.csv", statement.provider, account, from, to).replace('/', "-")
}
