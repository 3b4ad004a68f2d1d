use lazy_static::lazy_static;
use std::collections::HashSet;
use std::io::{self, BufRead};

lazy_static! {
    static ref ENGLISH_NOISE_WORDS: NoiseWords = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().collect()
    };
}

/// Case-insensitive set of words that are never indexed.
#[derive(Debug, Clone, Default)]
pub struct NoiseWords {
    words: HashSet<String>,
}

impl NoiseWords {
    pub fn new() -> Self { Self::default() }

    /// Built-in list of common English words, for runs without a noise-word file.
    pub fn default_english() -> Self {
        ENGLISH_NOISE_WORDS.clone()
    }

    /// Read whitespace-separated noise words, one or more per line.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut noise = Self::new();
        for line in reader.lines() {
            noise.extend(line?.split_whitespace());
        }
        Ok(noise)
    }

    /// Stored lower-cased so lookups agree with `keyword`.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() { return false; }
        self.words.insert(word)
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: AsRef<str>> Extend<S> for NoiseWords {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for NoiseWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut noise = Self::new();
        noise.extend(iter);
        noise
    }
}

/// Normalize a raw token into a keyword, or reject it.
///
/// The token is trimmed and lower-cased, then split at its first character
/// outside `a..=z`. A token made only of letters is kept whole. Otherwise the
/// split character must start a trailing run with no letters after it
/// (`"word?!"` gives `"word"`), while a letter after it means the
/// punctuation is embedded (`"wor?d"`) and the token is rejected. Which
/// non-letter caused the split does not matter. Empty results and noise
/// words are rejected.
pub fn keyword(token: &str, noise: &NoiseWords) -> Option<String> {
    let word = token.trim().to_lowercase();
    if word.is_empty() { return None; }

    let head = match word.char_indices().find(|(_, ch)| !ch.is_ascii_lowercase()) {
        None => word.as_str(),
        Some((cut, ch)) => {
            let tail = &word[cut + ch.len_utf8()..];
            if tail.chars().any(|c| c.is_ascii_lowercase()) { return None; }
            &word[..cut]
        }
    };

    if head.is_empty() || noise.contains(head) { return None; }
    Some(head.to_string())
}

/// Split a line on whitespace and keep the tokens that normalize to keywords, in order.
pub fn keywords(line: &str, noise: &NoiseWords) -> Vec<String> {
    line.split_whitespace()
        .filter_map(|token| keyword(token, noise))
        .collect()
}
