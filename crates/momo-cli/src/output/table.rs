use momo_core::export::format_money;
use momo_core::model::{Period, Statement};
use momo_core::parsing::values::{canonical_date, canonical_time};
use momo_core::summary::StatementSummary;
use std::fmt::Write;

const DESCRIPTION_WIDTH: usize = 40;

pub fn format_statement(statement: &Statement) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Provider:         {}", statement.provider);
    let _ = writeln!(
        out,
        "Account:          {}",
        statement.account_identifier.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "Period:           {}", format_period(statement.period));
    let _ = writeln!(out, "Opening balance:  {}", format_money(statement.opening_balance));
    let _ = writeln!(out, "Closing balance:  {}", format_money(statement.closing_balance));
    let _ = writeln!(out);

    let counterparty_width = statement
        .transactions
        .iter()
        .filter_map(|t| t.counterparty.as_deref())
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max("CounterParty".len());

    let _ = writeln!(
        out,
        "  {:<10}  {:<8}  {:<11}  {:>14}  {:>14}  {:<cw$}  Description",
        "Date",
        "Time",
        "Type",
        "Amount",
        "Balance",
        "CounterParty",
        cw = counterparty_width
    );
    for t in &statement.transactions {
        let _ = writeln!(
            out,
            "  {:<10}  {:<8}  {:<11}  {:>14}  {:>14}  {:<cw$}  {}",
            canonical_date(t.occurred_on),
            canonical_time(t.occurred_at),
            t.kind.to_string(),
            format_money(t.amount),
            format_money(t.balance_after),
            t.counterparty.as_deref().unwrap_or(""),
            truncate(&t.description, DESCRIPTION_WIDTH),
            cw = counterparty_width
        );
    }

    let _ = writeln!(out);
    let _ = write!(out, "{} transaction(s)", statement.transactions.len());
    if statement.dropped_chunks > 0 {
        let _ = write!(out, ", {} unreadable block(s) skipped", statement.dropped_chunks);
    }
    out
}

pub fn format_summary(summary: &StatementSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} statement summary ===\n", summary.provider);
    let _ = writeln!(
        out,
        "  Account:          {}",
        summary.account_identifier.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "  Period:           {}", format_period(summary.period));
    let _ = writeln!(out, "  Opening balance:  {}", format_money(summary.opening_balance));
    let _ = writeln!(out, "  Closing balance:  {}", format_money(summary.closing_balance));
    let _ = writeln!(out);

    for k in summary.by_kind.iter().filter(|k| k.count > 0) {
        let _ = writeln!(
            out,
            "  {:<12} {:>5}  {:>14}",
            k.kind.to_string(),
            k.count,
            format_money(k.total)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  Money in:   {:>14}", format_money(summary.total_in));
    let _ = writeln!(out, "  Money out:  {:>14}", format_money(summary.total_out));
    let _ = writeln!(out, "  Fees:       {:>14}", format_money(summary.total_fees));
    let _ = write!(out, "  Tax:        {:>14}", format_money(summary.total_tax));
    out
}

fn format_period(period: Option<Period>) -> String {
    match period {
        Some(p) => format!("{} - {}", canonical_date(p.from), canonical_date(p.to)),
        None => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
