use crate::document::DocumentKeywords;
use crate::ordered::insert_last_occurrence;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How many times a keyword occurs in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub document: String,
    pub frequency: u32,
}

impl Occurrence {
    pub fn new(document: impl Into<String>, frequency: u32) -> Self {
        Self { document: document.into(), frequency }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents: usize,
    pub keywords: usize,
    pub occurrences: usize,
}

/// Master index: keyword -> occurrences, each list in descending frequency
/// order with ties kept in merge order.
#[derive(Debug, Default, Clone)]
pub struct KeywordIndex {
    keywords: HashMap<String, Vec<Occurrence>>,
    documents: Vec<String>,
    seen: HashSet<String>,
}

impl KeywordIndex {
    pub fn new() -> Self { Self::default() }

    /// Fold one document's keywords into the index.
    ///
    /// Merging the same document twice is additive: its occurrences are
    /// appended a second time.
    pub fn merge(&mut self, doc: DocumentKeywords) {
        let document = doc.document().to_string();
        tracing::debug!(%document, keywords = doc.len(), "merging document");
        for (keyword, occurrence) in doc {
            let list = self.keywords.entry(keyword).or_default();
            list.push(occurrence);
            insert_last_occurrence(list);
        }
        if self.seen.insert(document.clone()) {
            self.documents.push(document);
        }
    }

    pub fn occurrences(&self, keyword: &str) -> Option<&[Occurrence]> {
        self.keywords.get(keyword).map(Vec::as_slice)
    }

    pub fn contains(&self, keyword: &str) -> bool { self.keywords.contains_key(keyword) }

    pub fn keywords(&self) -> impl Iterator<Item = (&str, &[Occurrence])> {
        self.keywords.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Distinct documents in the order they were first merged.
    pub fn documents(&self) -> &[String] { &self.documents }

    pub fn keyword_count(&self) -> usize { self.keywords.len() }

    pub fn document_count(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.keywords.is_empty() }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.document_count(),
            keywords: self.keyword_count(),
            occurrences: self.keywords.values().map(Vec::len).sum(),
        }
    }
}
