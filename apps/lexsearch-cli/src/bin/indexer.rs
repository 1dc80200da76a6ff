use std::env;

use lexsearch_core::config::Config;
use lexsearch_text::Preprocessor;
use lexsearch_vector::{rebuild, TfidfCache};

fn main() -> anyhow::Result<()> {
    lexsearch_cli::init_logging();
    if env::args().skip(1).any(|a| a == "--help" || a == "-h") {
        println!("Usage: lexsearch-index\nRebuilds the TF-IDF cache from the configured corpus.");
        return Ok(());
    }
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    let preprocessor = Preprocessor::from_settings(&settings)?;

    println!("TF-IDF Indexer\n==============");
    println!("Corpus: {}", settings.corpus_path().display());
    println!("Preprocessor: {}", preprocessor.id());
    let space = rebuild(&settings, &preprocessor)?;

    println!("\nIndexed {} units", space.len());
    println!("Vocabulary: {} terms", space.vectorizer().vocabulary_len());
    println!("Non-zero weights: {}", space.matrix().nnz());
    if settings.cache.enabled {
        println!("Cache: {}", TfidfCache::new(settings.cache_dir()).dir().display());
    } else {
        println!("Cache disabled, nothing stored");
    }
    Ok(())
}
