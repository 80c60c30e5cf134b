pub mod airtel;
pub mod mtn;

use crate::detect::Signals;
use crate::model::{Provider, StatementHeader, Transaction};
use regex::Regex;

/// Order in which a provider lists transactions in its statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOrder {
    NewestFirst,
    OldestFirst,
}

impl ChunkOrder {
    pub fn most_recent<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        match self {
            ChunkOrder::NewestFirst => items.first(),
            ChunkOrder::OldestFirst => items.last(),
        }
    }

    pub fn oldest<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        match self {
            ChunkOrder::NewestFirst => items.last(),
            ChunkOrder::OldestFirst => items.first(),
        }
    }
}

/// A transaction read from one chunk, with the raw evidence that direction
/// resolution still needs.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub transaction: Transaction,
    /// Raw from/to column, for layouts that have one.
    pub parties: Option<String>,
    /// Name the description points at, e.g. `GIDEON` in "Transfer to GIDEON".
    pub named_party: Option<String>,
    /// Direction cannot be known from this chunk alone.
    pub direction_unresolved: bool,
}

/// Chunking and field-extraction rules for one provider's statement layout.
///
/// Implementations hold only compiled, immutable patterns, so one instance
/// can serve any number of parses concurrently.
pub trait Grammar: Send + Sync {
    fn provider(&self) -> Provider;

    fn chunk_order(&self) -> ChunkOrder;

    /// Vocabulary used to recognise this provider's statements.
    fn signals(&self) -> &Signals;

    /// Split statement text into one slice per transaction.
    /// Text before the first transaction marker is not a chunk.
    fn chunk<'t>(&self, text: &'t str) -> Vec<&'t str>;

    /// Read one chunk. `None` means the chunk is not a transaction record.
    fn extract(&self, chunk: &str) -> Option<Candidate>;

    /// Second pass over the whole statement, for layouts where direction
    /// depends on other transactions.
    fn resolve(&self, _candidates: &mut [Candidate]) {}

    fn read_header(&self, text: &str) -> StatementHeader;
}

/// Cut `text` at the start of every `marker` match.
pub fn split_at_markers<'t>(text: &'t str, marker: &Regex) -> Vec<&'t str> {
    let starts: Vec<usize> = marker.find_iter(text).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}
