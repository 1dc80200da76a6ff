//! lexsearch-vector
//!
//! TF-IDF vector space over the corpus: sparse storage, the vectorizer, the
//! on-disk cache and cosine ranking. `prepare_data` is the entry point that
//! loads a cached space or builds and stores a new one.

use anyhow::Result;

use lexsearch_core::config::Settings;
use lexsearch_core::corpus::{load_corpus, Corpus};
use lexsearch_text::Preprocessor;

pub mod cache;
pub mod search;
pub mod space;
pub mod sparse;
pub mod tfidf;

pub use cache::TfidfCache;
pub use search::{search, Ranking};
pub use space::{IndexedUnit, VectorSpace};
pub use sparse::{CsrMatrix, SparseVector};
pub use tfidf::TfidfVectorizer;

/// Load the corpus and return its vector space, reusing the cache when it
/// still matches the corpus and the preprocessor.
pub fn prepare_data(settings: &Settings, preprocessor: &Preprocessor) -> Result<VectorSpace> {
    let corpus = load_corpus(&settings.corpus_path())?;
    if settings.cache.enabled {
        let cache = TfidfCache::new(settings.cache_dir());
        if let Some(space) = cache.load(&corpus, &preprocessor.id()) {
            tracing::info!(units = space.len(), dir = %cache.dir().display(), "Loading existing embeddings");
            return Ok(space);
        }
    }
    build_space(settings, &corpus, preprocessor)
}

/// Build from scratch regardless of any cache, then store the result.
pub fn rebuild(settings: &Settings, preprocessor: &Preprocessor) -> Result<VectorSpace> {
    let corpus = load_corpus(&settings.corpus_path())?;
    build_space(settings, &corpus, preprocessor)
}

fn build_space(settings: &Settings, corpus: &Corpus, preprocessor: &Preprocessor) -> Result<VectorSpace> {
    tracing::info!(units = corpus.len(), "Getting new embeddings");
    let space = VectorSpace::build(corpus, preprocessor)?;
    if settings.cache.enabled {
        let cache = TfidfCache::new(settings.cache_dir());
        cache.save(&space, corpus, &preprocessor.id())?;
        tracing::info!(dir = %cache.dir().display(), "Stored embeddings");
    }
    Ok(space)
}
