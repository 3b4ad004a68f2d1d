use crate::error::Result;
use crate::source::DocumentSource;
use crate::tokenizer::{keywords, NoiseWords};
use crate::Occurrence;
use std::collections::hash_map::{self, HashMap};

/// Keywords of a single document, each with its occurrence count there.
#[derive(Debug, Clone)]
pub struct DocumentKeywords {
    document: String,
    keywords: HashMap<String, Occurrence>,
}

impl DocumentKeywords {
    pub fn new(document: impl Into<String>) -> Self {
        Self { document: document.into(), keywords: HashMap::new() }
    }

    /// Scan raw lines of `document`, counting every token that normalizes to a keyword.
    pub fn from_lines<I>(document: impl Into<String>, lines: I, noise: &NoiseWords) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut doc = Self::new(document);
        for line in lines {
            for kw in keywords(line.as_ref(), noise) {
                doc.record(kw);
            }
        }
        doc
    }

    /// Count one more sighting of an already-normalized keyword.
    pub fn record(&mut self, keyword: String) {
        match self.keywords.entry(keyword) {
            hash_map::Entry::Occupied(mut e) => e.get_mut().frequency += 1,
            hash_map::Entry::Vacant(e) => {
                e.insert(Occurrence::new(self.document.clone(), 1));
            }
        }
    }

    pub fn document(&self) -> &str { &self.document }

    pub fn get(&self, keyword: &str) -> Option<&Occurrence> { self.keywords.get(keyword) }

    pub fn frequency(&self, keyword: &str) -> u32 {
        self.keywords.get(keyword).map_or(0, |o| o.frequency)
    }

    pub fn len(&self) -> usize { self.keywords.len() }

    pub fn is_empty(&self) -> bool { self.keywords.is_empty() }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Occurrence> { self.keywords.iter() }
}

impl IntoIterator for DocumentKeywords {
    type Item = (String, Occurrence);
    type IntoIter = hash_map::IntoIter<String, Occurrence>;

    fn into_iter(self) -> Self::IntoIter { self.keywords.into_iter() }
}

/// Read `document` from `source` and collect its keywords.
///
/// A document the source cannot locate yields `Error::NotFound`.
pub fn index_document<S>(source: &S, document: &str, noise: &NoiseWords) -> Result<DocumentKeywords>
where
    S: DocumentSource + ?Sized,
{
    let lines = source.lines(document)?;
    Ok(DocumentKeywords::from_lines(document, lines, noise))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn counts_repeat_sightings() {
        let noise: NoiseWords = ["the"].into_iter().collect();
        let doc = DocumentKeywords::from_lines(
            "story.txt",
            ["The Cat sat.", "  the cat, the CAT!  ", ""],
            &noise,
        );
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.frequency("cat"), 3);
        assert_eq!(doc.frequency("sat"), 1);
        assert_eq!(doc.frequency("the"), 0);
        assert_eq!(doc.get("cat").unwrap().document, "story.txt");
    }

    #[test]
    fn missing_document_is_reported() {
        let source = MemorySource::new();
        let err = index_document(&source, "nowhere.txt", &NoiseWords::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn reads_through_a_source() {
        let mut source = MemorySource::new();
        source.insert("a.txt", "alpha beta\nalpha? gam;ma");
        let doc = index_document(&source, "a.txt", &NoiseWords::new()).unwrap();
        assert_eq!(doc.document(), "a.txt");
        assert_eq!(doc.frequency("alpha"), 2);
        assert_eq!(doc.frequency("beta"), 1);
        assert!(doc.get("gam").is_none());
    }
}
