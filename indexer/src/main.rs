use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use littlesearch_core::tokenizer::keyword;
use littlesearch_core::{build_index, Corpus, Hit, KeywordIndex, NoiseWords, TOP_K};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a keyword index over a set of documents and run OR queries", long_about = None)]
struct Cli {
    #[command(flatten)]
    corpus: CorpusArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Document-list file (one document per line) or a directory of .txt documents
    #[arg(long, global = true, default_value = "docs.txt")]
    docs: PathBuf,
    /// Noise-word file; a built-in English list is used when omitted
    #[arg(long, global = true)]
    noise: Option<PathBuf>,
    /// Base directory for relative document names (defaults to the list's directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print document, keyword and occurrence counts
    Stats {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Top documents containing either keyword
    Search {
        kw1: String,
        kw2: String,
        #[arg(long, default_value_t = TOP_K)]
        limit: usize,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Occurrence list of a single keyword
    Lookup {
        keyword: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    kw1: &'a str,
    kw2: &'a str,
    results: Option<Vec<Hit>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let corpus = Corpus { docs: cli.corpus.docs, noise: cli.corpus.noise, root: cli.corpus.root };
    let noise = corpus.noise_words()?;
    let (documents, source) = corpus.documents()?;
    let index = build_index(&documents, &source, &noise)?;

    match cli.command {
        Commands::Stats { json } => print_stats(&index, json),
        Commands::Search { kw1, kw2, limit, json } => search(&index, &noise, &kw1, &kw2, limit, json),
        Commands::Lookup { keyword, json } => lookup(&index, &noise, &keyword, json),
    }
}

/// Query words go through the same normalization as document text; a
/// rejected word can never be in the index.
fn normalize_query(word: &str, noise: &NoiseWords) -> String {
    keyword(word, noise).unwrap_or_default()
}

fn print_stats(index: &KeywordIndex, json: bool) -> Result<()> {
    let stats = index.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("documents:   {}", stats.documents);
        println!("keywords:    {}", stats.keywords);
        println!("occurrences: {}", stats.occurrences);
    }
    Ok(())
}

fn search(index: &KeywordIndex, noise: &NoiseWords, kw1: &str, kw2: &str, limit: usize, json: bool) -> Result<()> {
    let (k1, k2) = (normalize_query(kw1, noise), normalize_query(kw2, noise));
    let results = index.search(&k1, &k2, limit.max(1));
    tracing::debug!(kw1 = %k1, kw2 = %k2, hits = results.as_ref().map_or(0, Vec::len), "search");

    if json {
        let out = SearchOutput { kw1: &k1, kw2: &k2, results };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    match results {
        None => println!("no matches for \"{kw1}\" or \"{kw2}\""),
        Some(hits) => {
            for (rank, hit) in hits.iter().enumerate() {
                println!("{:>2}. {} ({})", rank + 1, hit.document, hit.frequency);
            }
        }
    }
    Ok(())
}

fn lookup(index: &KeywordIndex, noise: &NoiseWords, word: &str, json: bool) -> Result<()> {
    let kw = normalize_query(word, noise);
    let occs = index.occurrences(&kw);
    if json {
        println!("{}", serde_json::to_string_pretty(&occs)?);
        return Ok(());
    }
    match occs {
        None => println!("\"{word}\" is not indexed"),
        Some(occs) => {
            for occ in occs {
                println!("{}\t{}", occ.frequency, occ.document);
            }
        }
    }
    Ok(())
}
