use crate::model::Period;
use crate::parsing::values::{normalize_date, parse_amount, DateFormat};
use rust_decimal::Decimal;

/// Read the account identifier (phone or account number) after the first
/// label that yields one.
pub fn read_account(text: &str, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| {
        let value = extract_after_label(text, label)?;
        let token = value.split_whitespace().next()?;
        if token.chars().any(|c| c.is_ascii_digit()) {
            Some(token.to_string())
        } else {
            None
        }
    })
}

/// Read a labeled money value such as `Opening Balance: UGX 150,000`.
pub fn read_amount(text: &str, labels: &[&str]) -> Option<Decimal> {
    labels.iter().find_map(|label| {
        let value = extract_after_label(text, label)?;
        let value = value.trim_start_matches("UGX").trim_start();
        let token: String = value
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
            .collect();
        if token.chars().any(|c| c.is_ascii_digit()) {
            Some(parse_amount(&token))
        } else {
            None
        }
    })
}

/// Read a labeled period such as `Statement Period: 01-Mar-24 to 31-Mar-24`.
/// Each date is tried against `formats` in order.
pub fn read_period(text: &str, labels: &[&str], formats: &[DateFormat]) -> Option<Period> {
    labels.iter().find_map(|label| {
        let value = extract_after_label(text, label)?;
        let lower = value.to_ascii_lowercase();
        let split = lower.find(" to ")?;
        let from_raw = value[..split].split_whitespace().next()?;
        let to_raw = value[split + 4..].split_whitespace().next()?;
        let from = parse_with_any(from_raw, formats)?;
        let to = parse_with_any(to_raw, formats)?;
        Some(Period { from, to })
    })
}

fn parse_with_any(raw: &str, formats: &[DateFormat]) -> Option<chrono::NaiveDate> {
    formats.iter().find_map(|f| normalize_date(raw, *f))
}

/// Extract a value appearing after a label (case-insensitive).
/// Handles patterns like "Label: value" or "Label    value". When the label
/// ends its line, the next non-empty line is taken as the value.
/// Truncates at the next large whitespace gap (3+ spaces) to avoid capturing
/// neighbouring columns.
fn extract_after_label(text: &str, label: &str) -> Option<String> {
    let label = label.to_ascii_lowercase();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let lower = line.to_ascii_lowercase();
        let Some(idx) = lower.find(&label) else {
            continue;
        };

        let after = &line[idx + label.len()..];
        let mut trimmed = after
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .trim_end();
        if trimmed.is_empty() {
            trimmed = lines
                .by_ref()
                .map(|l| l.trim_start_matches(|c: char| c == ':' || c.is_whitespace()).trim_end())
                .find(|l| !l.is_empty())?;
        }

        let value = match trimmed.find("   ") {
            Some(gap_pos) => trimmed[..gap_pos].trim(),
            None => trimmed.trim(),
        };
        return if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const HEADER: &str = "Airtel Money Statement
Mobile Number : 0701234567     Customer Name : JANE DOE
Statement Period : 01-Mar-24 to 31-Mar-24
Opening Balance : UGX 12,000.00
Closing Balance:
  30,880.00
";

    #[test]
    fn test_read_account() {
        assert_eq!(
            read_account(HEADER, &["Mobile Number"]).as_deref(),
            Some("0701234567")
        );
    }

    #[test]
    fn test_read_account_requires_digits() {
        assert!(read_account("Account Number: Unknown", &["Account Number"]).is_none());
    }

    #[test]
    fn test_read_period_month_names() {
        let p = read_period(
            HEADER,
            &["Statement Period"],
            &[DateFormat::DayMonthNameShortYear],
        )
        .unwrap();
        assert_eq!(p.from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(p.to, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_read_period_numeric() {
        let text = "Statement Period: 01/02/2024 to 28/02/2024";
        let p = read_period(text, &["Statement Period"], &[DateFormat::DayMonthYear]).unwrap();
        assert_eq!(p.to, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    }

    #[test]
    fn test_read_amounts() {
        assert_eq!(read_amount(HEADER, &["Opening Balance"]), Some(dec!(12000.00)));
        // value on the following line
        assert_eq!(read_amount(HEADER, &["Closing Balance"]), Some(dec!(30880.00)));
    }

    #[test]
    fn test_missing_label() {
        assert!(read_amount("nothing here", &["Opening Balance"]).is_none());
        assert!(read_period("nothing here", &["Period"], &[DateFormat::DayMonthYear]).is_none());
    }
}
