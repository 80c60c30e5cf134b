use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{Period, Provider, Statement, TransactionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindTotal {
    pub kind: TransactionKind,
    pub count: usize,
    pub total: Decimal,
}

/// Per-kind totals and balances for one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementSummary {
    pub provider: Provider,
    pub account_identifier: Option<String>,
    pub period: Option<Period>,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub transaction_count: usize,
    /// Every kind, in display order, including kinds with no transactions.
    pub by_kind: Vec<KindTotal>,
    pub total_in: Decimal,
    pub total_out: Decimal,
    pub total_fees: Decimal,
    pub total_tax: Decimal,
}

impl StatementSummary {
    pub fn from_statement(statement: &Statement) -> Self {
        let by_kind: Vec<KindTotal> = TransactionKind::ALL
            .iter()
            .map(|&kind| {
                let matching = statement.transactions.iter().filter(|t| t.kind == kind);
                KindTotal {
                    kind,
                    count: matching.clone().count(),
                    total: matching.map(|t| t.amount).sum(),
                }
            })
            .collect();

        let sum_kinds = |kinds: &[TransactionKind]| -> Decimal {
            by_kind
                .iter()
                .filter(|k| kinds.contains(&k.kind))
                .map(|k| k.total)
                .sum()
        };
        let total_in = sum_kinds(&[TransactionKind::Receive, TransactionKind::Deposit]);
        let total_out = sum_kinds(&[
            TransactionKind::Send,
            TransactionKind::Withdraw,
            TransactionKind::PayBill,
            TransactionKind::BuyAirtime,
        ]);

        StatementSummary {
            provider: statement.provider,
            account_identifier: statement.account_identifier.clone(),
            period: statement.period,
            opening_balance: statement.opening_balance,
            closing_balance: statement.closing_balance,
            transaction_count: statement.transactions.len(),
            total_in,
            total_out,
            total_fees: statement.transactions.iter().map(|t| t.fee).sum(),
            total_tax: statement.transactions.iter().map(|t| t.tax).sum(),
            by_kind,
        }
    }

    pub fn kind(&self, kind: TransactionKind) -> Option<&KindTotal> {
        self.by_kind.iter().find(|k| k.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transaction;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    fn tx(kind: TransactionKind, amount: Decimal, fee: Decimal) -> Transaction {
        Transaction {
            occurred_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            occurred_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            kind,
            description: String::new(),
            amount,
            fee,
            tax: dec!(0),
            balance_after: dec!(0),
            counterparty: None,
            reference: "1".into(),
            provider: Provider::Mtn,
        }
    }

    #[test]
    fn test_summary_totals() {
        let statement = Statement {
            provider: Provider::Mtn,
            account_identifier: None,
            period: None,
            opening_balance: dec!(0),
            closing_balance: dec!(100),
            transactions: vec![
                tx(TransactionKind::Receive, dec!(1000), dec!(0)),
                tx(TransactionKind::Deposit, dec!(500), dec!(0)),
                tx(TransactionKind::Send, dec!(300), dec!(50)),
                tx(TransactionKind::Withdraw, dec!(200), dec!(25)),
                tx(TransactionKind::Other, dec!(7), dec!(0)),
            ],
            dropped_chunks: 0,
            warnings: Vec::new(),
        };
        let summary = StatementSummary::from_statement(&statement);
        assert_eq!(summary.transaction_count, 5);
        assert_eq!(summary.total_in, dec!(1500));
        assert_eq!(summary.total_out, dec!(500));
        assert_eq!(summary.total_fees, dec!(75));
        assert_eq!(summary.by_kind.len(), TransactionKind::ALL.len());
        assert_eq!(summary.kind(TransactionKind::Other).unwrap().total, dec!(7));
        assert_eq!(summary.kind(TransactionKind::PayBill).unwrap().count, 0);
    }
}
