//! MTN Mobile Money statements.
//!
//! Extracted text carries no column separators. Each transaction starts with
//! the date and time glued together, newest first:
//!
//!   15-03-202414:22:05Cash Out Withdrawal 123456789012 GIDEONMAKU RAPHAEAL
//!   UGX 50,000.00 UGX 1,500.00 UGX 0.00 UGX 120,000.00

use chrono::NaiveTime;
use regex::Regex;

use crate::detect::Signals;
use crate::model::{Provider, StatementHeader, Transaction, TransactionKind};
use crate::parsing::header::{read_account, read_amount, read_period};
use crate::parsing::normalize::dedup_name;
use crate::parsing::values::{collapse_whitespace, normalize_date, parse_amount, DateFormat};
use crate::providers::{split_at_markers, Candidate, ChunkOrder, Grammar};
use crate::resolve::resolve_directions;

/// Payment descriptions naming one of these are airtime or bundle purchases.
const AIRTIME_VENDORS: &[&str] = &["airtime", "bundle", "mtn uganda", "airtel uganda"];

const ACCOUNT_LABELS: &[&str] = &["Account Number", "Mobile Number", "MSISDN"];

pub struct MtnGrammar {
    marker: Regex,
    row: Regex,
    named_party: Regex,
    signals: Signals,
}

impl MtnGrammar {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(MtnGrammar {
            marker: Regex::new(r"\d{2}-\d{2}-\d{4}\d{2}:\d{2}:\d{2}")?,
            row: Regex::new(concat!(
                r"(?s)^(?P<date>\d{2}-\d{2}-\d{4})(?P<time>\d{2}:\d{2}:\d{2})\s*",
                r"(?P<category>Cash\s*Out|Cash\s*In|Transfer|Payment)\s*",
                r"(?P<desc>.*?)\s*",
                r"(?P<reference>\d{9,12})\s*",
                r"(?P<parties>\D.*?)\s*",
                r"UGX\s*(?P<amount>\d[\d,]*(?:\.\d+)?)\s*",
                r"UGX\s*(?P<fee>\d[\d,]*(?:\.\d+)?)\s*",
                r"UGX\s*(?P<tax>\d[\d,]*(?:\.\d+)?)\s*",
                r"UGX\s*(?P<balance>\d[\d,]*(?:\.\d+)?)",
            ))?,
            named_party: Regex::new(r"(?i)\b(?:to|from)\s+(?P<name>\S.*)$")?,
            signals: Signals::new(
                &["MTN Mobile Money", "MTN MoMo", "MTN Uganda"],
                &["Mobile Money Statement", "MM Statement"],
                &[
                    r"(?i)\bCash\s*Out\b",
                    r"(?i)\bCash\s*In\b",
                    r"(?i)Send Money to \d+",
                    r"(?i)You have received UGX",
                    r"\d{2}-\d{2}-\d{4}\d{2}:\d{2}:\d{2}",
                ],
            )?,
        })
    }
}

impl Grammar for MtnGrammar {
    fn provider(&self) -> Provider {
        Provider::Mtn
    }

    fn chunk_order(&self) -> ChunkOrder {
        ChunkOrder::NewestFirst
    }

    fn signals(&self) -> &Signals {
        &self.signals
    }

    fn chunk<'t>(&self, text: &'t str) -> Vec<&'t str> {
        split_at_markers(text, &self.marker)
    }

    fn extract(&self, chunk: &str) -> Option<Candidate> {
        let caps = self.row.captures(chunk)?;

        let occurred_on = normalize_date(&caps["date"], DateFormat::DayMonthYear)?;
        let occurred_at = NaiveTime::parse_from_str(&caps["time"], "%H:%M:%S").ok()?;

        let category: String = caps["category"].split_whitespace().collect();
        let description = match collapse_whitespace(&caps["desc"]) {
            d if d.is_empty() => collapse_whitespace(&caps["category"]),
            d => d,
        };
        let kind = classify(&category, &description);

        let parties = collapse_whitespace(&caps["parties"]);
        let named_party = self
            .named_party
            .captures(&description)
            .map(|c| dedup_name(c["name"].trim()));
        let counterparty = named_party
            .clone()
            .or_else(|| (!parties.is_empty()).then(|| dedup_name(&parties)));

        Some(Candidate {
            transaction: Transaction {
                occurred_on,
                occurred_at,
                kind,
                description,
                amount: parse_amount(&caps["amount"]),
                fee: parse_amount(&caps["fee"]),
                tax: parse_amount(&caps["tax"]),
                balance_after: parse_amount(&caps["balance"]),
                counterparty,
                reference: caps["reference"].to_string(),
                provider: Provider::Mtn,
            },
            parties: Some(parties),
            named_party,
            direction_unresolved: category == "Transfer",
        })
    }

    fn resolve(&self, candidates: &mut [Candidate]) {
        resolve_directions(candidates);
    }

    fn read_header(&self, text: &str) -> StatementHeader {
        StatementHeader {
            account_identifier: read_account(text, ACCOUNT_LABELS),
            period: read_period(text, &["Statement Period"], &[DateFormat::DayMonthYear]),
            opening_balance: read_amount(text, &["Opening Balance"]),
            closing_balance: read_amount(text, &["Closing Balance"]),
        }
    }
}

/// Map the category column to a kind. Transfers start out as `Send` until
/// direction resolution has seen the whole statement.
fn classify(category: &str, description: &str) -> TransactionKind {
    match category {
        "CashOut" => TransactionKind::Withdraw,
        "CashIn" => TransactionKind::Deposit,
        "Payment" => {
            let lower = description.to_lowercase();
            if AIRTIME_VENDORS.iter().any(|v| lower.contains(v)) {
                TransactionKind::BuyAirtime
            } else {
                TransactionKind::PayBill
            }
        }
        "Transfer" => TransactionKind::Send,
        _ => TransactionKind::Other,
    }
}
