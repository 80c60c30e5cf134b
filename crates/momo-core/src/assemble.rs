use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::model::{Period, Statement, StatementWarning, Transaction};
use crate::providers::{Candidate, ChunkOrder, Grammar};

/// Run one grammar over statement text and package the result.
///
/// Never fails: chunks the grammar rejects are counted and skipped, and a
/// statement with no transactions is still returned.
pub fn assemble(grammar: &dyn Grammar, text: &str) -> Statement {
    let chunks = grammar.chunk(text);
    let mut candidates: Vec<Candidate> = Vec::with_capacity(chunks.len());
    let mut dropped = 0;

    for chunk in &chunks {
        match grammar.extract(chunk) {
            Some(candidate) => candidates.push(candidate),
            None => {
                dropped += 1;
                let snippet: String = chunk.chars().take(60).collect();
                debug!(
                    provider = %grammar.provider(),
                    chunk = %snippet,
                    "chunk did not match the transaction layout"
                );
            }
        }
    }

    grammar.resolve(&mut candidates);
    let transactions: Vec<Transaction> = candidates.into_iter().map(|c| c.transaction).collect();

    let header = grammar.read_header(text);
    let order = grammar.chunk_order();
    let mut warnings = Vec::new();

    if dropped > 0 {
        warnings.push(StatementWarning::DroppedChunks { count: dropped });
    }

    let period = header.period.or_else(|| {
        let derived = derive_period(&transactions, order)?;
        warnings.push(StatementWarning::PeriodDerived);
        Some(derived)
    });

    let closing_balance = match header.closing_balance {
        Some(balance) => balance,
        None => {
            warnings.push(StatementWarning::ClosingBalanceDerived);
            order
                .most_recent(&transactions)
                .map(|t| t.balance_after)
                .unwrap_or(Decimal::ZERO)
        }
    };

    let opening_balance = match header.opening_balance {
        Some(balance) => balance,
        None => {
            warnings.push(StatementWarning::OpeningBalanceDefaulted);
            Decimal::ZERO
        }
    };

    for reference in duplicate_references(&transactions) {
        warn!(reference = %reference, "duplicate transaction reference");
        warnings.push(StatementWarning::DuplicateReference { reference });
    }

    info!(
        provider = %grammar.provider(),
        transactions = transactions.len(),
        dropped_chunks = dropped,
        "statement assembled"
    );

    Statement {
        provider: grammar.provider(),
        account_identifier: header.account_identifier,
        period,
        opening_balance,
        closing_balance,
        transactions,
        dropped_chunks: dropped,
        warnings,
    }
}

/// Period spanning the oldest and the most recent transaction.
fn derive_period(transactions: &[Transaction], order: ChunkOrder) -> Option<Period> {
    let from = order.oldest(transactions)?.occurred_on;
    let to = order.most_recent(transactions)?.occurred_on;
    Some(Period { from, to })
}

/// Each reference seen more than once, reported once, in first-seen order.
fn duplicate_references(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for t in transactions {
        if !seen.insert(t.reference.as_str()) && reported.insert(t.reference.as_str()) {
            duplicates.push(t.reference.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mtn::MtnGrammar;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const NEWEST: &str = "20-03-202410:00:00Cash In Deposit 111111111 AGENT ONE UGX 10,000.00 UGX 0.00 UGX 0.00 UGX 60,000.00\n";
    const OLDEST: &str = "05-03-202409:00:00Cash In Deposit 222222222 AGENT TWO UGX 50,000.00 UGX 0.00 UGX 0.00 UGX 50,000.00\n";

    #[test]
    fn test_derives_missing_metadata() {
        let grammar = MtnGrammar::new().unwrap();
        let text = format!("MTN Mobile Money\n{NEWEST}{OLDEST}");
        let statement = assemble(&grammar, &text);

        assert_eq!(statement.transactions.len(), 2);
        let period = statement.period.unwrap();
        assert_eq!(period.from, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(period.to, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert_eq!(statement.closing_balance, dec!(60000.00));
        assert_eq!(statement.opening_balance, Decimal::ZERO);
        assert!(statement.warnings.contains(&StatementWarning::PeriodDerived));
        assert!(statement.warnings.contains(&StatementWarning::ClosingBalanceDerived));
        assert!(statement.warnings.contains(&StatementWarning::OpeningBalanceDefaulted));
    }

    #[test]
    fn test_header_values_win() {
        let grammar = MtnGrammar::new().unwrap();
        let text = format!(
            "Statement Period: 01-03-2024 to 31-03-2024\nOpening Balance: 40,000\nClosing Balance: 60,000\n{NEWEST}{OLDEST}"
        );
        let statement = assemble(&grammar, &text);
        assert_eq!(statement.period.unwrap().from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(statement.opening_balance, dec!(40000));
        assert_eq!(statement.closing_balance, dec!(60000));
        assert!(statement.warnings.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let grammar = MtnGrammar::new().unwrap();
        let statement = assemble(&grammar, "");
        assert!(statement.transactions.is_empty());
        assert_eq!(statement.closing_balance, Decimal::ZERO);
        assert_eq!(statement.period, None);
        assert_eq!(statement.dropped_chunks, 0);
    }

    #[test]
    fn test_duplicate_references_reported_once() {
        let grammar = MtnGrammar::new().unwrap();
        let text = format!("{NEWEST}{NEWEST}{NEWEST}{OLDEST}");
        let statement = assemble(&grammar, &text);
        let duplicates: Vec<_> = statement
            .warnings
            .iter()
            .filter(|w| matches!(w, StatementWarning::DuplicateReference { .. }))
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(statement.transactions.len(), 4);
    }

    #[test]
    fn test_dropped_chunks_counted() {
        let grammar = MtnGrammar::new().unwrap();
        let text = format!("{NEWEST}01-03-202400:00:00 page break noise\n{OLDEST}");
        let statement = assemble(&grammar, &text);
        assert_eq!(statement.transactions.len(), 2);
        assert_eq!(statement.dropped_chunks, 1);
        assert!(statement
            .warnings
            .contains(&StatementWarning::DroppedChunks { count: 1 }));
    }
}
