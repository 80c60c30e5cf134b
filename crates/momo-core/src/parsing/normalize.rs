use regex::{Captures, Regex};

/// Collapse a counterparty name that the statement layout rendered twice.
///
/// Steps:
/// 1. Try every split point `i` in `[ceil(n/3), floor((n+1)/2)]`; accept the
///    first one where the remainder (minus one leading separator) equals the
///    prefix.
/// 2. Otherwise split into words and accept two identical halves.
/// 3. Otherwise return the input unchanged.
///
/// Repeated until nothing changes, so `dedup_name(dedup_name(s)) == dedup_name(s)`.
pub fn dedup_name(raw: &str) -> String {
    let mut current = raw.to_string();
    while let Some(shorter) = dedup_once(&current) {
        current = shorter;
    }
    current
}

fn dedup_once(s: &str) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();

    if n >= 2 {
        let lo = n.div_ceil(3);
        let hi = (n + 1) / 2;
        for i in lo..=hi {
            let prefix = &chars[..i];
            let mut rest = &chars[i..];
            if rest.first().is_some_and(|c| is_separator(*c)) {
                rest = &rest[1..];
            }
            if rest == prefix {
                return Some(prefix.iter().collect());
            }
        }
    }

    let words: Vec<&str> = s.split_whitespace().collect();
    let half = words.len() / 2;
    if half > 0 && words.len() % 2 == 0 && words[..half] == words[half..] {
        return Some(words[..half].join(" "));
    }

    None
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '/' | '|' | ',')
}

/// Undo common damage from PDF text extraction before chunking.
///
/// Rejoins dates, clock times and thousands groups that picked up stray
/// spaces, and removes `Page N of M` footers. Line breaks are never joined.
/// Thousands groups are only rejoined inside money, a number ending in two
/// decimals, so `Plot 12, 345 Road` in a description is left alone.
#[derive(Debug, Clone)]
pub struct TextRepair {
    spaced_date: Regex,
    spaced_time: Regex,
    spaced_thousands: Regex,
    page_footer: Regex,
}

impl TextRepair {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(TextRepair {
            spaced_date: Regex::new(r"(\d{2})[ \t]*([-/])[ \t]*(\d{2})[ \t]*([-/])[ \t]*(\d{4}|\d{2})")?,
            spaced_time: Regex::new(r"(\d{2})[ \t]*:[ \t]*(\d{2})(?:[ \t]*:[ \t]*(\d{2}))?")?,
            spaced_thousands: Regex::new(r"(\d{1,3})[ \t]*,[ \t]*(\d{3})((?:,\d{3})*\.\d{2})")?,
            page_footer: Regex::new(r"(?i)Page[ \t]*\d+[ \t]*of[ \t]*\d+")?,
        })
    }

    pub fn repair(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let text = self.page_footer.replace_all(&text, "");
        let text = self.spaced_date.replace_all(&text, "$1$2$3$4$5");
        let text = self.spaced_time.replace_all(&text, |caps: &Captures| match caps.get(3) {
            Some(seconds) => format!("{}:{}:{}", &caps[1], &caps[2], seconds.as_str()),
            None => format!("{}:{}", &caps[1], &caps[2]),
        });
        let mut text = text.into_owned();
        // Each pass rejoins the last split group of an amount.
        loop {
            let joined = self.spaced_thousands.replace_all(&text, "$1,$2$3").into_owned();
            if joined == text {
                return text;
            }
            text = joined;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_with_space() {
        assert_eq!(dedup_name("UEDCL UEDCL"), "UEDCL");
    }

    #[test]
    fn test_dedup_without_space() {
        assert_eq!(
            dedup_name("HOUSING FINANCE BANK LIMITEDHOUSING FINANCE BANK LIMITED"),
            "HOUSING FINANCE BANK LIMITED"
        );
    }

    #[test]
    fn test_dedup_no_repetition() {
        assert_eq!(dedup_name("JOHN DOE"), "JOHN DOE");
    }

    #[test]
    fn test_dedup_word_halves() {
        assert_eq!(dedup_name("JANE DOE  JANE DOE"), "JANE DOE");
    }

    #[test]
    fn test_dedup_empty_and_single_char() {
        assert_eq!(dedup_name(""), "");
        assert_eq!(dedup_name("A"), "A");
    }

    #[test]
    fn test_dedup_idempotent() {
        let samples = [
            "UEDCL UEDCL",
            "AAAA",
            "JOHN JOHN JOHN JOHN",
            "HOUSING FINANCE BANK LIMITEDHOUSING FINANCE BANK LIMITED",
            "JOHN DOE",
            "ab ab ab",
            "Émile Émile",
            "",
        ];
        for s in samples {
            let once = dedup_name(s);
            assert_eq!(dedup_name(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_dedup_multibyte() {
        assert_eq!(dedup_name("Émile Émile"), "Émile");
    }

    #[test]
    fn test_repair_spaced_date_and_time() {
        let repair = TextRepair::new().unwrap();
        assert_eq!(repair.repair("15 - 03 - 2024 14 : 22 : 05"), "15-03-2024 14:22:05");
        assert_eq!(repair.repair("12-03 -24 10 :15AM"), "12-03-24 10:15AM");
    }

    #[test]
    fn test_repair_thousands_and_footer() {
        let repair = TextRepair::new().unwrap();
        assert_eq!(repair.repair("UGX 30 , 880.00 Page 2 of 7"), "UGX 30,880.00 ");
    }

    #[test]
    fn test_repair_thousands_only_in_money() {
        let repair = TextRepair::new().unwrap();
        assert_eq!(repair.repair("Paid to Plot 12, 345 Road"), "Paid to Plot 12, 345 Road");
        assert_eq!(repair.repair("UGX 1 , 234 , 567.00"), "UGX 1,234,567.00");
        assert_eq!(repair.repair("Debit 0.0030 , 880.00"), "Debit 0.0030,880.00");
    }

    #[test]
    fn test_repair_keeps_line_breaks() {
        let repair = TextRepair::new().unwrap();
        assert_eq!(repair.repair("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(repair.repair("12\n:30"), "12\n:30");
    }
}
