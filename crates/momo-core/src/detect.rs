use crate::model::Provider;
use crate::providers::Grammar;
use regex::Regex;
use tracing::debug;

/// Text that identifies a provider's statements.
#[derive(Debug, Clone)]
pub struct Signals {
    /// Brand names, stored upper-case.
    brands: Vec<String>,
    /// Statement-title phrases, stored upper-case.
    titles: Vec<String>,
    /// Transaction vocabulary only this provider uses.
    verbs: Vec<Regex>,
}

impl Signals {
    pub fn new(brands: &[&str], titles: &[&str], verbs: &[&str]) -> Result<Self, regex::Error> {
        let upper = |phrases: &[&str]| phrases.iter().map(|p| p.to_uppercase()).collect();
        Ok(Signals {
            brands: upper(brands),
            titles: upper(titles),
            verbs: verbs
                .iter()
                .map(|v| Regex::new(v))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    /// `upper_text` must already be upper-cased.
    fn mentions_brand(&self, upper_text: &str) -> bool {
        self.brands.iter().any(|b| upper_text.contains(b.as_str()))
    }

    fn mentions_title(&self, upper_text: &str) -> bool {
        self.titles.iter().any(|t| upper_text.contains(t.as_str()))
    }

    fn uses_vocabulary(&self, text: &str) -> bool {
        self.verbs.iter().any(|v| v.is_match(text))
    }
}

/// Work out which provider produced `text`.
///
/// Brand names are checked for every grammar first, then statement titles in
/// grammar order (MTN before Airtel), then transaction vocabulary. `None` when
/// nothing matches.
pub fn detect_provider(text: &str, grammars: &[Box<dyn Grammar>]) -> Option<Provider> {
    let upper = text.to_uppercase();

    if let Some(g) = grammars.iter().find(|g| g.signals().mentions_brand(&upper)) {
        debug!(provider = %g.provider(), "provider detected from brand name");
        return Some(g.provider());
    }

    if let Some(g) = grammars.iter().find(|g| g.signals().mentions_title(&upper)) {
        debug!(provider = %g.provider(), "provider detected from statement title");
        return Some(g.provider());
    }

    if let Some(g) = grammars.iter().find(|g| g.signals().uses_vocabulary(text)) {
        debug!(provider = %g.provider(), "provider detected from transaction vocabulary");
        return Some(g.provider());
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::model::Provider;
    use crate::StatementParser;

    fn detect(text: &str) -> Option<Provider> {
        StatementParser::new().unwrap().detect(text)
    }

    #[test]
    fn test_mtn_brand() {
        assert_eq!(detect("MTN Mobile Money Statement"), Some(Provider::Mtn));
        assert_eq!(detect("welcome to mtn momo"), Some(Provider::Mtn));
    }

    #[test]
    fn test_airtel_brand() {
        assert_eq!(detect("Airtel Money Statement"), Some(Provider::Airtel));
        assert_eq!(detect("AIRTEL UGANDA LIMITED"), Some(Provider::Airtel));
    }

    #[test]
    fn test_statement_titles() {
        assert_eq!(detect("MOBILE MONEY STATEMENT\nAccount 1"), Some(Provider::Mtn));
        assert_eq!(detect("MM STATEMENT"), Some(Provider::Mtn));
        assert_eq!(detect("Money Statement for March"), Some(Provider::Airtel));
    }

    #[test]
    fn test_brand_beats_title() {
        assert_eq!(detect("Airtel Uganda\nMobile Money Statement"), Some(Provider::Airtel));
    }

    #[test]
    fn test_vocabulary_fallback() {
        assert_eq!(detect("12-03-2024 Cash Out agent"), Some(Provider::Mtn));
        assert_eq!(detect("Cash withdrawal at agent"), Some(Provider::Airtel));
        assert_eq!(detect("Sent Money to 0701234567"), Some(Provider::Airtel));
    }

    #[test]
    fn test_nothing_detected() {
        assert_eq!(detect("Quarterly bank statement, nothing to see"), None);
        assert_eq!(detect(""), None);
    }
}
