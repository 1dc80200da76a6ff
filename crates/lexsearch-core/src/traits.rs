use crate::types::Sentence;

/// Morphological analysis backend used by the preprocessor.
///
/// Implementations split text into sentences of tokens and attach a lemma to
/// every token. `id` must change whenever the lemmas produced for the same
/// input could change, since it is recorded in the cache manifest.
pub trait Lemmatizer: Send + Sync {
    fn id(&self) -> String;
    fn analyze(&self, text: &str) -> anyhow::Result<Vec<Sentence>>;
}
