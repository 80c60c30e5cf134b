use crate::model::TransactionKind;
use crate::parsing::normalize::dedup_name;
use crate::parsing::values::collapse_whitespace;
use crate::providers::Candidate;
use tracing::debug;

/// Longest prefix shared by every string, compared character by character.
/// `None` for an empty input.
pub fn longest_common_prefix<S: AsRef<str>>(items: &[S]) -> Option<String> {
    let (first, rest) = items.split_first()?;
    let mut prefix: Vec<char> = first.as_ref().chars().collect();
    for item in rest {
        let shared = prefix
            .iter()
            .zip(item.as_ref().chars())
            .take_while(|(a, b)| **a == *b)
            .count();
        prefix.truncate(shared);
    }
    Some(prefix.into_iter().collect())
}

/// Infer the statement holder's name from party fields of transactions
/// the holder is known to be part of (cash-outs).
pub fn infer_holder_name<S: AsRef<str>>(fields: &[S]) -> Option<String> {
    let prefix = longest_common_prefix(fields)?;
    let name = prefix.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '/' | ',' | ':'));
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// A transfer naming the holder was received, anything else was sent.
pub fn transfer_direction(holder: &str, named_party: &str) -> TransactionKind {
    let Some(token) = named_party.split_whitespace().next() else {
        return TransactionKind::Send;
    };
    if holder.to_uppercase().starts_with(&token.to_uppercase()) {
        TransactionKind::Receive
    } else {
        TransactionKind::Send
    }
}

/// Resolve transfer directions across a whole statement.
///
/// Returns the inferred holder name, if any withdrawals were present.
pub fn resolve_directions(candidates: &mut [Candidate]) -> Option<String> {
    let cash_out_parties: Vec<&str> = candidates
        .iter()
        .filter(|c| c.transaction.kind == TransactionKind::Withdraw)
        .filter_map(|c| c.parties.as_deref())
        .collect();
    let holder = infer_holder_name(&cash_out_parties);

    let Some(holder_name) = holder.as_deref() else {
        debug!("no withdrawals to infer the holder from, transfers stay as sent");
        return None;
    };
    debug!(holder = holder_name, "inferred statement holder");

    for candidate in candidates.iter_mut() {
        let other_party = candidate
            .parties
            .as_deref()
            .and_then(|p| strip_holder(p, holder_name));

        if candidate.direction_unresolved {
            let kind = candidate
                .named_party
                .as_deref()
                .map(|name| transfer_direction(holder_name, name))
                .unwrap_or(TransactionKind::Send);
            debug!(reference = %candidate.transaction.reference, %kind, "resolved transfer");
            candidate.transaction.kind = kind;
            // The name in the description is the holder's own.
            if kind == TransactionKind::Receive {
                candidate.transaction.counterparty = other_party;
            }
            candidate.direction_unresolved = false;
        } else if candidate.named_party.is_none() {
            if let Some(other) = other_party {
                candidate.transaction.counterparty = Some(other);
            }
        }
    }

    holder
}

/// The party field with the holder's name removed from wherever it appears,
/// or `None` when nothing else remains.
fn strip_holder(parties: &str, holder: &str) -> Option<String> {
    let trim = |c: char| c.is_whitespace() || matches!(c, '-' | '/' | ',' | ':');
    // ASCII upper-casing keeps byte offsets valid for slicing `parties`.
    let rest = match parties.to_ascii_uppercase().find(&holder.to_ascii_uppercase()) {
        Some(start) => format!(
            "{} {}",
            parties[..start].trim_end_matches(trim),
            parties[start + holder.len()..].trim_start_matches(trim)
        ),
        None => parties.to_string(),
    };
    let rest = collapse_whitespace(rest.trim_matches(trim));
    if rest.is_empty() {
        None
    } else {
        Some(dedup_name(&rest))
    }
}
