use crate::document::index_document;
use crate::error::{Error, Result, SourceKind};
use crate::tokenizer::NoiseWords;
use crate::KeywordIndex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Produces the raw lines of a named document.
pub trait DocumentSource {
    fn lines(&self, document: &str) -> Result<Vec<String>>;
}

/// Documents on disk, with relative identifiers resolved against `root`.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn resolve(&self, document: &str) -> PathBuf {
        let path = Path::new(document);
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }
}

impl DocumentSource for FileSource {
    fn lines(&self, document: &str) -> Result<Vec<String>> {
        read_lines(&self.resolve(document), SourceKind::Document)
    }
}

/// Documents held in memory, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, document: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(document.into(), text.into());
    }
}

impl DocumentSource for MemorySource {
    fn lines(&self, document: &str) -> Result<Vec<String>> {
        match self.docs.get(document) {
            Some(text) => Ok(text.lines().map(str::to_string).collect()),
            None => Err(Error::NotFound { kind: SourceKind::Document, path: PathBuf::from(document) }),
        }
    }
}

fn open(path: &Path, kind: SourceKind) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::from_io(kind, path, e))
}

fn read_lines(path: &Path, kind: SourceKind) -> Result<Vec<String>> {
    open(path, kind)?
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::from_io(kind, path, e))
}

/// Load a noise-word file: whitespace-separated words, any number per line.
pub fn load_noise_words<P: AsRef<Path>>(path: P) -> Result<NoiseWords> {
    let path = path.as_ref();
    NoiseWords::from_reader(open(path, SourceKind::NoiseWords)?)
        .map_err(|e| Error::from_io(SourceKind::NoiseWords, path, e))
}

/// Load a document list: one identifier per non-blank line, in order.
pub fn load_document_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let lines = read_lines(path.as_ref(), SourceKind::DocumentList)?;
    Ok(lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Files under `dir` with the given extension, sorted by path so the merge order is stable.
pub fn discover_documents<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::NotFound { kind: SourceKind::DocumentList, path: dir.to_path_buf() });
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some(extension))
        .collect();
    files.sort();
    Ok(files)
}

/// Index every document in `documents`, in order, into a fresh master index.
///
/// Stops at the first document the source cannot provide.
pub fn build_index<S, D>(documents: &[D], source: &S, noise: &NoiseWords) -> Result<KeywordIndex>
where
    S: DocumentSource + ?Sized,
    D: AsRef<str>,
{
    let mut index = KeywordIndex::new();
    for document in documents {
        let keywords = index_document(source, document.as_ref(), noise)?;
        index.merge(keywords);
    }
    let stats = index.stats();
    tracing::info!(documents = stats.documents, keywords = stats.keywords, "index build complete");
    Ok(index)
}

/// Where a corpus comes from: a document-list file or a directory of `.txt`
/// documents, plus an optional noise-word file.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub docs: PathBuf,
    pub noise: Option<PathBuf>,
    /// Base for relative identifiers in a document list. Defaults to the
    /// list's own directory; ignored when `docs` is a directory.
    pub root: Option<PathBuf>,
}

impl Corpus {
    pub fn new<P: AsRef<Path>>(docs: P) -> Self {
        Self { docs: docs.as_ref().to_path_buf(), ..Default::default() }
    }

    pub fn with_noise<P: AsRef<Path>>(mut self, noise: P) -> Self {
        self.noise = Some(noise.as_ref().to_path_buf());
        self
    }

    pub fn with_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    pub fn noise_words(&self) -> Result<NoiseWords> {
        match &self.noise {
            Some(path) => load_noise_words(path),
            None => Ok(NoiseWords::default_english()),
        }
    }

    /// Document identifiers in merge order, and the source that resolves them.
    pub fn documents(&self) -> Result<(Vec<String>, FileSource)> {
        if self.docs.is_dir() {
            let documents = discover_documents(&self.docs, "txt")?
                .iter()
                .map(|p| p.strip_prefix(&self.docs).unwrap_or(p).to_string_lossy().into_owned())
                .collect();
            return Ok((documents, FileSource::new(&self.docs)));
        }
        let documents = load_document_list(&self.docs)?;
        let root = match &self.root {
            Some(root) => root.clone(),
            None => self.docs.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        Ok((documents, FileSource::new(root)))
    }

    pub fn build(&self) -> Result<KeywordIndex> {
        let noise = self.noise_words()?;
        let (documents, source) = self.documents()?;
        build_index(&documents, &source, &noise)
    }
}
