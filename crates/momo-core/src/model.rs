use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "MTN")]
    Mtn,
    #[serde(rename = "Airtel")]
    Airtel,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Mtn => write!(f, "MTN"),
            Provider::Airtel => write!(f, "Airtel"),
        }
    }
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Mtn, Provider::Airtel];

    pub fn from_str_loose(s: &str) -> Option<Provider> {
        let lower = s.trim().to_lowercase();
        if lower.contains("mtn") {
            Some(Provider::Mtn)
        } else if lower.contains("airtel") {
            Some(Provider::Airtel)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Send,
    Receive,
    Withdraw,
    Deposit,
    #[serde(rename = "Pay Bill")]
    PayBill,
    #[serde(rename = "Buy Airtime")]
    BuyAirtime,
    Other,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            TransactionKind::Send => "Send",
            TransactionKind::Receive => "Receive",
            TransactionKind::Withdraw => "Withdraw",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::PayBill => "Pay Bill",
            TransactionKind::BuyAirtime => "Buy Airtime",
            TransactionKind::Other => "Other",
        };
        f.write_str(tag)
    }
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 7] = [
        TransactionKind::Send,
        TransactionKind::Receive,
        TransactionKind::Withdraw,
        TransactionKind::Deposit,
        TransactionKind::PayBill,
        TransactionKind::BuyAirtime,
        TransactionKind::Other,
    ];
}

/// One financial event as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub occurred_on: NaiveDate,
    pub occurred_at: NaiveTime,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub tax: Decimal,
    /// Balance as reported by the provider; never recomputed.
    pub balance_after: Decimal,
    pub counterparty: Option<String>,
    pub reference: String,
    pub provider: Provider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Explicit header fields a grammar managed to read from the statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementHeader {
    pub account_identifier: Option<String>,
    pub period: Option<Period>,
    pub opening_balance: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
}

/// Data-quality conditions noticed while assembling a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementWarning {
    DroppedChunks { count: usize },
    OpeningBalanceDefaulted,
    ClosingBalanceDerived,
    PeriodDerived,
    DuplicateReference { reference: String },
}

impl fmt::Display for StatementWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementWarning::DroppedChunks { count } => {
                write!(f, "{count} transaction block(s) did not match the statement layout and were skipped")
            }
            StatementWarning::OpeningBalanceDefaulted => {
                write!(f, "opening balance not reported by the statement; defaulted to 0")
            }
            StatementWarning::ClosingBalanceDerived => {
                write!(f, "closing balance taken from the most recent transaction")
            }
            StatementWarning::PeriodDerived => {
                write!(f, "statement period derived from transaction dates")
            }
            StatementWarning::DuplicateReference { reference } => {
                write!(f, "transaction reference {reference} appears more than once")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub provider: Provider,
    pub account_identifier: Option<String>,
    pub period: Option<Period>,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    /// Transactions in the order they appear in the source text.
    pub transactions: Vec<Transaction>,
    /// Marker-delimited chunks that failed the provider grammar.
    pub dropped_chunks: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<StatementWarning>,
}

impl Statement {
    /// Turn an empty statement into an error, for callers that treat
    /// "nothing matched" as a user-facing failure.
    pub fn require_transactions(self) -> Result<Statement, crate::error::StatementError> {
        if self.transactions.is_empty() {
            return Err(crate::error::StatementError::NoTransactions {
                provider: self.provider,
            });
        }
        Ok(self)
    }
}
