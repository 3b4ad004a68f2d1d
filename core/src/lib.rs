pub mod document;
pub mod error;
pub mod index;
pub mod ordered;
pub mod search;
pub mod source;
pub mod tokenizer;

pub use document::{index_document, DocumentKeywords};
pub use error::{Error, Result, SourceKind};
pub use index::{IndexStats, KeywordIndex, Occurrence};
pub use ordered::{find_insert_position, insert_last_occurrence, InsertTrace};
pub use search::{merge_occurrences, Hit, TOP_K};
pub use source::{build_index, Corpus, DocumentSource, FileSource, MemorySource};
pub use tokenizer::{keyword, keywords, NoiseWords};
