pub mod assemble;
pub mod detect;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod providers;
pub mod resolve;
pub mod summary;

use std::borrow::Cow;

use error::StatementError;
use extraction::PdfExtractor;
use model::{Provider, Statement};
use parsing::normalize::TextRepair;
use providers::airtel::AirtelGrammar;
use providers::mtn::MtnGrammar;
use providers::Grammar;
use tracing::debug;

/// Caller choices for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip detection and use this provider's grammar.
    pub provider: Option<Provider>,
    /// Rejoin dates, times and amounts split by stray spaces before parsing.
    pub repair_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            provider: None,
            repair_text: true,
        }
    }
}

/// Compiled grammars for every supported provider.
///
/// Build once and reuse; parsing takes `&self` and keeps no state between
/// calls, so one parser can be shared across threads.
pub struct StatementParser {
    repair: TextRepair,
    grammars: Vec<Box<dyn Grammar>>,
}

impl StatementParser {
    pub fn new() -> Result<Self, StatementError> {
        Ok(StatementParser {
            repair: TextRepair::new()?,
            grammars: vec![Box::new(MtnGrammar::new()?), Box::new(AirtelGrammar::new()?)],
        })
    }

    pub fn grammar(&self, provider: Provider) -> Option<&dyn Grammar> {
        self.grammars
            .iter()
            .find(|g| g.provider() == provider)
            .map(|g| g.as_ref())
    }

    /// Detect which provider produced `text`.
    pub fn detect(&self, text: &str) -> Option<Provider> {
        detect::detect_provider(text, &self.grammars)
    }

    /// Parse linearized statement text.
    ///
    /// Fails only when no provider was given and none could be detected. A
    /// statement whose grammar matched nothing comes back with an empty
    /// transaction list; see [`Statement::require_transactions`].
    pub fn parse(&self, text: &str, options: &ParseOptions) -> Result<Statement, StatementError> {
        let text: Cow<'_, str> = if options.repair_text {
            Cow::Owned(self.repair.repair(text))
        } else {
            Cow::Borrowed(text)
        };

        let provider = match options.provider {
            Some(p) => p,
            None => self.detect(&text).ok_or(StatementError::ProviderUndetectable)?,
        };
        debug!(%provider, repaired = options.repair_text, "parsing statement text");

        let grammar = self
            .grammar(provider)
            .ok_or_else(|| StatementError::UnknownProvider(provider.to_string()))?;
        Ok(assemble::assemble(grammar, &text))
    }

    /// Extract text from a statement PDF and parse it.
    pub fn parse_pdf(
        &self,
        pdf_bytes: &[u8],
        extractor: &dyn PdfExtractor,
        options: &ParseOptions,
    ) -> Result<Statement, StatementError> {
        let text = extraction::extract_text(pdf_bytes, extractor)?;
        self.parse(&text, options)
    }
}

/// One-shot convenience wrapper around [`StatementParser::parse`].
///
/// Compiles every grammar on each call; hold a [`StatementParser`] when
/// parsing more than one statement.
pub fn parse_text(text: &str, options: &ParseOptions) -> Result<Statement, StatementError> {
    StatementParser::new()?.parse(text, options)
}

/// Main API entry point: extract text from a statement PDF and parse it.
///
/// One-shot like [`parse_text`]; see [`StatementParser::parse_pdf`].
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    options: &ParseOptions,
) -> Result<Statement, StatementError> {
    StatementParser::new()?.parse_pdf(pdf_bytes, extractor, options)
}
