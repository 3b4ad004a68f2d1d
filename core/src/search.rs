//! Disjunctive ("kw1 OR kw2") queries over the master index.

use crate::{KeywordIndex, Occurrence};
use serde::Serialize;
use std::collections::HashSet;

pub const TOP_K: usize = 5;

/// A matching document and the frequency of the occurrence that ranked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub document: String,
    pub frequency: u32,
}

/// Two-pointer merge of two descending-frequency lists into one.
///
/// On equal frequencies both heads are emitted, `first`'s element before `second`'s.
pub fn merge_occurrences<'a>(first: &'a [Occurrence], second: &'a [Occurrence]) -> Vec<&'a Occurrence> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let (mut i, mut j) = (0, 0);
    while i < first.len() && j < second.len() {
        let (a, b) = (&first[i], &second[j]);
        if a.frequency > b.frequency {
            merged.push(a);
            i += 1;
        } else if b.frequency > a.frequency {
            merged.push(b);
            j += 1;
        } else {
            merged.push(a);
            merged.push(b);
            i += 1;
            j += 1;
        }
    }
    merged.extend(&first[i..]);
    merged.extend(&second[j..]);
    merged
}

/// First `limit` distinct documents from a ranked sequence of occurrences.
fn distinct_hits<'a, I>(ranked: I, limit: usize) -> Vec<Hit>
where
    I: IntoIterator<Item = &'a Occurrence>,
{
    let mut seen = HashSet::new();
    let mut hits = Vec::new();
    for occ in ranked {
        if hits.len() == limit { break; }
        if seen.insert(occ.document.as_str()) {
            hits.push(Hit { document: occ.document.clone(), frequency: occ.frequency });
        }
    }
    hits
}

impl KeywordIndex {
    /// Documents containing `kw1` or `kw2`, by descending frequency, at most
    /// `limit` of them and each listed once.
    ///
    /// `None` when neither keyword is indexed. Keywords are looked up as
    /// given; normalize them first if they come from user input.
    pub fn search(&self, kw1: &str, kw2: &str, limit: usize) -> Option<Vec<Hit>> {
        let hits = match (self.occurrences(kw1), self.occurrences(kw2)) {
            (None, None) => return None,
            (Some(only), None) | (None, Some(only)) => distinct_hits(only, limit),
            (Some(first), Some(second)) => distinct_hits(merge_occurrences(first, second), limit),
        };
        Some(hits)
    }

    /// The top five documents for "`kw1` OR `kw2`".
    pub fn top5(&self, kw1: &str, kw2: &str) -> Option<Vec<String>> {
        self.search(kw1, kw2, TOP_K)
            .map(|hits| hits.into_iter().map(|h| h.document).collect())
    }
}
