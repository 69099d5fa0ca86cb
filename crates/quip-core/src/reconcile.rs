//! Local/remote quote reconciliation.
//!
//! Pure functions over in-memory slices; no I/O. The sync engine feeds these
//! the persisted collection and a freshly fetched remote snapshot, then
//! persists the merged result.

use std::collections::HashMap;

use crate::models::Quote;

/// Result of merging a local collection with a remote snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// The converged collection, deduplicated.
    pub merged: Vec<Quote>,
    /// Remote records with no local counterpart, appended.
    pub added: usize,
    /// Local records a remote counterpart marked as synced.
    pub updated: usize,
}

/// Merge `local` with a fetched `remote` snapshot, remote taking precedence.
///
/// Records match on `(text, category)`. A remote record with no local match
/// is appended; a pending local match is marked synced. The merged output
/// never contains two records with the same merge key.
#[must_use]
pub fn reconcile(local: &[Quote], remote: &[Quote]) -> ReconcileOutcome {
    let mut merged: Vec<Quote> = local.to_vec();
    let mut added = 0;
    let mut updated = 0;

    for incoming in remote {
        let existing = merged
            .iter_mut()
            .find(|quote| quote.merge_key() == incoming.merge_key());

        match existing {
            Some(quote) => {
                if quote.is_pending() {
                    quote.synced = true;
                    updated += 1;
                }
            }
            None => {
                let mut quote = incoming.clone();
                quote.synced = true;
                merged.push(quote);
                added += 1;
            }
        }
    }

    ReconcileOutcome {
        merged: dedup_quotes(merged),
        added,
        updated,
    }
}

/// Records not yet acknowledged by the remote feed (the upload batch).
#[must_use]
pub fn collect_pending(local: &[Quote]) -> Vec<&Quote> {
    local.iter().filter(|quote| quote.is_pending()).collect()
}

/// Drop duplicate `(text, category)` records, synced records winning.
///
/// Survivors keep the earliest occurrence's slot in the output order. When
/// a later duplicate is synced and the kept one is not, the synced record
/// replaces it in place.
#[must_use]
pub fn dedup_quotes(quotes: Vec<Quote>) -> Vec<Quote> {
    let mut kept: Vec<Quote> = Vec::with_capacity(quotes.len());
    let mut index_by_key: HashMap<(String, String), usize> = HashMap::new();

    for quote in quotes {
        let key = (quote.text.clone(), quote.category.clone());
        match index_by_key.get(&key) {
            Some(&slot) => {
                if quote.synced && kept[slot].is_pending() {
                    kept[slot] = quote;
                }
            }
            None => {
                index_by_key.insert(key, kept.len());
                kept.push(quote);
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quote;
    use pretty_assertions::assert_eq;

    fn local(text: &str, category: &str) -> Quote {
        Quote::new(text, category)
    }

    fn remote(text: &str, category: &str) -> Quote {
        Quote::from_remote(text, category)
    }

    #[test]
    fn addition_appends_remote_records() {
        let outcome = reconcile(&[], &[remote("B", "Y")]);

        assert_eq!(outcome.merged.len(), 1);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.updated, 0);
        assert!(outcome.merged[0].synced);
    }

    #[test]
    fn remote_precedence_marks_pending_match_synced() {
        let outcome = reconcile(&[local("A", "X")], &[remote("A", "X")]);

        assert_eq!(outcome.added, 0);
        assert_eq!(outcome.updated, 1);
        assert_eq!(outcome.merged.len(), 1);
        assert!(outcome.merged[0].synced);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let locals = vec![local("A", "X"), local("B", "Y")];
        let snapshot = vec![remote("A", "X"), remote("C", "Z")];

        let first = reconcile(&locals, &snapshot);
        assert_eq!(first.added, 1);
        assert_eq!(first.updated, 1);

        let second = reconcile(&first.merged, &snapshot);
        assert_eq!(second.added, 0);
        assert_eq!(second.updated, 0);
        assert_eq!(second.merged, first.merged);
    }

    #[test]
    fn empty_remote_snapshot_is_a_noop_merge() {
        let locals = vec![local("A", "X"), local("B", "Y")];

        let outcome = reconcile(&locals, &[]);
        assert_eq!(outcome.added, 0);
        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.merged, locals);
    }

    #[test]
    fn no_two_merged_records_share_a_key() {
        let locals = vec![local("A", "X"), local("A", "X"), local("B", "Y")];
        let snapshot = vec![remote("A", "X"), remote("B", "Y")];

        let outcome = reconcile(&locals, &snapshot);

        let mut keys: Vec<_> = outcome
            .merged
            .iter()
            .map(|quote| (quote.text.clone(), quote.category.clone()))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), outcome.merged.len());
    }

    #[test]
    fn same_text_different_category_stays_distinct() {
        let locals = vec![local("A", "X")];
        let snapshot = vec![remote("A", "Y")];

        let outcome = reconcile(&locals, &snapshot);
        assert_eq!(outcome.merged.len(), 2);
        assert_eq!(outcome.added, 1);
    }

    #[test]
    fn collect_pending_excludes_synced() {
        let quotes = vec![local("A", "X"), remote("B", "Y"), local("C", "Z")];

        let pending = collect_pending(&quotes);
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|quote| quote.is_pending()));
    }

    #[test]
    fn dedup_keeps_first_occurrence_slot() {
        let quotes = vec![local("A", "X"), local("B", "Y"), local("A", "X")];

        let deduped = dedup_quotes(quotes);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].text, "A");
        assert_eq!(deduped[1].text, "B");
    }

    #[test]
    fn dedup_prefers_synced_duplicate_over_earlier_pending() {
        let pending = local("A", "X");
        let acknowledged = remote("A", "X");
        let deduped = dedup_quotes(vec![pending, local("B", "Y"), acknowledged.clone()]);

        assert_eq!(deduped.len(), 2);
        // The synced copy survives, in the earlier slot
        assert_eq!(deduped[0].id, acknowledged.id);
        assert!(deduped[0].synced);
        assert_eq!(deduped[1].text, "B");
    }

    #[test]
    fn dedup_keeps_earlier_synced_duplicate() {
        let first = remote("A", "X");
        let deduped = dedup_quotes(vec![first.clone(), remote("A", "X")]);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, first.id);
    }
}
