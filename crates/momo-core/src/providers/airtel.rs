//! Airtel Money statements.
//!
//! Rows are listed oldest first and open with a 12-digit transaction id
//! followed by a short date and a 12-hour clock:
//!
//!   123456789012 12-03-2410:15 AMSent Money to 0701234567 JOHN DOEJOHN DOE
//!   Success UGX 5,000.00 Debit 0.0030,880.00
//!
//! The fee and balance columns are not separated when the fee ends in `.00`.

use regex::Regex;

use crate::detect::Signals;
use crate::model::{Provider, StatementHeader, Transaction, TransactionKind};
use crate::parsing::header::{read_account, read_amount, read_period};
use crate::parsing::normalize::dedup_name;
use crate::parsing::values::{
    collapse_whitespace, normalize_date, normalize_time, parse_amount, DateFormat, Meridiem,
};
use crate::providers::{split_at_markers, Candidate, ChunkOrder, Grammar};

const ACCOUNT_LABELS: &[&str] = &["Mobile Number", "Account Number", "MSISDN"];

/// Direction column of an Airtel row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Credit,
    Debit,
}

pub struct AirtelGrammar {
    marker: Regex,
    row: Regex,
    counterparty: Regex,
    signals: Signals,
}

impl AirtelGrammar {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(AirtelGrammar {
            marker: Regex::new(r"\d{12}\s?\d{2}-\d{2}-\d{2}\d{2}:\d{2}\s?(?:AM|PM)")?,
            row: Regex::new(concat!(
                r"(?s)^(?P<reference>\d{12})\s?",
                r"(?P<date>\d{2}-\d{2}-\d{2})(?P<hour>\d{2}):(?P<minute>\d{2})\s?(?P<meridiem>AM|PM)\s*",
                r"(?P<desc>.*?)\s*Success\s*",
                r"(?:UGX\s*)?(?P<amount>\d[\d,]*(?:\.\d{2})?)\s*",
                r"(?P<direction>Credit|Debit)\s*",
                r"(?P<fee>\d[\d,]*(?:\.\d{2})?)\s*",
                r"(?P<balance>\d[\d,]*(?:\.\d{2})?)",
            ))?,
            counterparty: Regex::new(
                r"(?i)\b(?:to|from|at)\s+(?:(?P<number>\+?\d{6,15})\s*)?(?P<name>.*)$",
            )?,
            signals: Signals::new(
                &["Airtel Money", "Airtel Uganda", "Airtel Africa"],
                &["Money Statement"],
                &[
                    r"(?i)Cash withdrawal",
                    r"(?i)Cash deposit",
                    r"(?i)Merchant payment",
                    r"(?i)Sent Money to",
                    r"(?i)Received Money from",
                    r"(?i)Transfer to \d+",
                    r"\d{12}\s?\d{2}-\d{2}-\d{2}\d{2}:\d{2}\s?(?:AM|PM)",
                ],
            )?,
        })
    }

    fn counterparty(&self, description: &str) -> Option<String> {
        let caps = self.counterparty.captures(description)?;
        let name = dedup_name(caps["name"].trim());
        if !name.is_empty() {
            return Some(name);
        }
        caps.name("number").map(|n| n.as_str().to_string())
    }
}

impl Grammar for AirtelGrammar {
    fn provider(&self) -> Provider {
        Provider::Airtel
    }

    fn chunk_order(&self) -> ChunkOrder {
        ChunkOrder::OldestFirst
    }

    fn signals(&self) -> &Signals {
        &self.signals
    }

    fn chunk<'t>(&self, text: &'t str) -> Vec<&'t str> {
        split_at_markers(text, &self.marker)
    }

    fn extract(&self, chunk: &str) -> Option<Candidate> {
        let caps = self.row.captures(chunk)?;

        let occurred_on = normalize_date(&caps["date"], DateFormat::DayMonthShortYear)?;
        let occurred_at = normalize_time(
            caps["hour"].parse().ok()?,
            caps["minute"].parse().ok()?,
            Meridiem::from_str_loose(&caps["meridiem"]),
        )?;

        let direction = match &caps["direction"] {
            "Credit" => Direction::Credit,
            _ => Direction::Debit,
        };
        let description = collapse_whitespace(&caps["desc"]);
        let kind = classify(&description, direction);
        let counterparty = self.counterparty(&description);

        Some(Candidate {
            transaction: Transaction {
                occurred_on,
                occurred_at,
                kind,
                description,
                amount: parse_amount(&caps["amount"]),
                fee: parse_amount(&caps["fee"]),
                tax: rust_decimal::Decimal::ZERO,
                balance_after: parse_amount(&caps["balance"]),
                counterparty: counterparty.clone(),
                reference: caps["reference"].to_string(),
                provider: Provider::Airtel,
            },
            parties: None,
            named_party: counterparty,
            direction_unresolved: false,
        })
    }

    fn read_header(&self, text: &str) -> StatementHeader {
        StatementHeader {
            account_identifier: read_account(text, ACCOUNT_LABELS),
            period: read_period(
                text,
                &["Statement Period", "Period"],
                &[
                    DateFormat::DayMonthNameShortYear,
                    DateFormat::DayMonthYear,
                    DateFormat::DayMonthShortYear,
                ],
            ),
            opening_balance: read_amount(text, &["Opening Balance"]),
            closing_balance: read_amount(text, &["Closing Balance"]),
        }
    }
}

/// Keyword rules first; the explicit direction column decides the rest.
fn classify(description: &str, direction: Direction) -> TransactionKind {
    let lower = description.to_lowercase();
    if lower.contains("sent money to") {
        TransactionKind::Send
    } else if lower.contains("received from") || lower.contains("received money from") {
        TransactionKind::Receive
    } else if lower.contains("paid to") {
        if lower.contains("airtime") || lower.contains("bundle") {
            TransactionKind::BuyAirtime
        } else {
            TransactionKind::PayBill
        }
    } else if lower.contains("cash withdrawal") {
        TransactionKind::Withdraw
    } else if lower.contains("cash deposit") {
        TransactionKind::Deposit
    } else {
        match direction {
            Direction::Credit => TransactionKind::Receive,
            Direction::Debit => TransactionKind::Send,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    fn grammar() -> AirtelGrammar {
        AirtelGrammar::new().unwrap()
    }

    const SENT: &str = "123456789012 12-03-2410:15 AMSent Money to 0701234567 JOHN DOEJOHN DOE\nSuccess UGX 5,000.00 Debit 0.0030,880.00\n";

    #[test]
    fn test_extract_sent_money() {
        let c = grammar().extract(SENT).unwrap();
        let t = &c.transaction;
        assert_eq!(t.reference, "123456789012");
        assert_eq!(t.occurred_on, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
        assert_eq!(t.occurred_at, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
        assert_eq!(t.kind, TransactionKind::Send);
        assert_eq!(t.description, "Sent Money to 0701234567 JOHN DOEJOHN DOE");
        assert_eq!(t.amount, dec!(5000.00));
        assert_eq!(t.fee, dec!(0.00));
        assert_eq!(t.tax, dec!(0));
        assert_eq!(t.counterparty.as_deref(), Some("JOHN DOE"));
        assert!(!c.direction_unresolved);
    }

    #[test]
    fn test_fee_glued_to_balance() {
        let c = grammar().extract(SENT).unwrap();
        assert_eq!(c.transaction.balance_after, dec!(30880.00));

        let chunk = "223456789012 13-03-2401:05 PMPaid to UMEME LTD Success 40,000.00 Debit 1,500.00250,000.00";
        let t = grammar().extract(chunk).unwrap().transaction;
        assert_eq!(t.fee, dec!(1500.00));
        assert_eq!(t.balance_after, dec!(250000.00));
        assert_eq!(t.kind, TransactionKind::PayBill);
        assert_eq!(t.occurred_at, NaiveTime::from_hms_opt(13, 5, 0).unwrap());
    }

    #[test]
    fn test_keyword_kinds() {
        let received = "323456789012 14-03-2412:00 AMReceived Money from 0772000111 MARY MARY Success UGX 10,000.00 Credit 0.00 40,880.00";
        let t = grammar().extract(received).unwrap().transaction;
        assert_eq!(t.kind, TransactionKind::Receive);
        assert_eq!(t.counterparty.as_deref(), Some("MARY"));
        assert_eq!(t.occurred_at, NaiveTime::from_hms_opt(0, 0, 0).unwrap());

        let bundle = "423456789012 14-03-2409:00 AMPaid to Airtel Bundles Success 2,000.00 Debit 0.00 38,880.00";
        assert_eq!(grammar().extract(bundle).unwrap().transaction.kind, TransactionKind::BuyAirtime);

        let withdraw = "523456789012 15-03-2409:30 AMCash withdrawal at 0755000222 AGENT SHOP Success 20,000.00 Debit 500.00 18,380.00";
        let t = grammar().extract(withdraw).unwrap().transaction;
        assert_eq!(t.kind, TransactionKind::Withdraw);
        assert_eq!(t.counterparty.as_deref(), Some("AGENT SHOP"));
    }

    #[test]
    fn test_direction_fallback() {
        let credit = "623456789012 16-03-2411:00 AMReversal Success 1,000.00 Credit 0.00 19,380.00";
        let debit = "723456789012 16-03-2411:05 AMService charge Success 100.00 Debit 0.00 19,280.00";
        assert_eq!(grammar().extract(credit).unwrap().transaction.kind, TransactionKind::Receive);
        assert_eq!(grammar().extract(debit).unwrap().transaction.kind, TransactionKind::Send);
    }

    #[test]
    fn test_number_without_name() {
        let chunk = "823456789012 17-03-2408:00 AMSent Money to 0701234567 Success 1,000.00 Debit 0.00 18,280.00";
        let t = grammar().extract(chunk).unwrap().transaction;
        assert_eq!(t.counterparty.as_deref(), Some("0701234567"));
    }

    #[test]
    fn test_failed_transaction_dropped() {
        let chunk = "923456789012 17-03-2408:00 AMSent Money to 0701234567 Failed 1,000.00 Debit 0.00 18,280.00";
        assert!(grammar().extract(chunk).is_none());
    }

    #[test]
    fn test_chunking_with_optional_spaces() {
        let text = format!("Airtel Money Statement\n{SENT}1234567890121 3-03-24\n223456789012 13-03-2401:05PMPaid to UMEME Success 1.00 Debit 0.00 1.00");
        let chunks = grammar().chunk(&text);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].starts_with("223456789012 13-03-2401:05PM"));
    }

    #[test]
    fn test_read_header() {
        let text = "Airtel Money Statement\nMobile Number : 0701234567\nStatement Period : 01-Mar-24 to 31-Mar-24\nOpening Balance : UGX 35,880.00\nClosing Balance : UGX 18,280.00\n";
        let h = grammar().read_header(text);
        assert_eq!(h.account_identifier.as_deref(), Some("0701234567"));
        let p = h.period.unwrap();
        assert_eq!(p.from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(p.to, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(h.opening_balance, Some(dec!(35880.00)));
        assert_eq!(h.closing_balance, Some(dec!(18280.00)));
    }
}
