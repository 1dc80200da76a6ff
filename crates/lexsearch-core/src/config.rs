//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys separated by `__`, e.g. `APP_CACHE__DIR`). Every setting has a
//! default, so running without any config file is valid.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const DEFAULT_QUERY: &str = "Kdaj začne uredba veljati in se uporabljati?";

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self::from_figment(figment);
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    /// Wrap an already merged figment; used by `load_for_env` and by callers
    /// that layer their own providers.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Typed view of the whole configuration, defaults filled in.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract::<Settings>()
            .map_err(|e| Error::InvalidConfig(e.to_string()).into())
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        let settings = self.settings()?;
        if settings.corpus.path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("corpus.path must not be empty".into()).into());
        }
        if settings.cache.dir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("cache.dir must not be empty".into()).into());
        }
        if matches!(env, "prod" | "production") && settings.preprocess.lexicon_path.is_none() {
            tracing::warn!("no preprocess.lexicon_path in production, tokens will not be lemmatized");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub corpus: CorpusSettings,
    pub cache: CacheSettings,
    pub preprocess: PreprocessSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorpusSettings {
    pub path: PathBuf,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self { path: PathBuf::from("ai_act.yaml") }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheSettings {
    pub dir: PathBuf,
    pub enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { dir: PathBuf::from("embeddings/tfidf"), enabled: true }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreprocessSettings {
    /// Tab-separated `form<TAB>lemma` lexicon. Without it tokens are their own lemma.
    pub lexicon_path: Option<PathBuf>,
    /// One stopword per line. Without it the bundled Slovene list is used.
    pub stopwords_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub default_query: String,
    pub top_n: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { default_query: DEFAULT_QUERY.to_string(), top_n: None }
    }
}

impl Settings {
    pub fn corpus_path(&self) -> PathBuf {
        expand_path(self.corpus.path.to_string_lossy())
    }

    pub fn cache_dir(&self) -> PathBuf {
        expand_path(self.cache.dir.to_string_lossy())
    }

    pub fn lexicon_path(&self) -> Option<PathBuf> {
        self.preprocess.lexicon_path.as_ref().map(|p| expand_path(p.to_string_lossy()))
    }

    pub fn stopwords_path(&self) -> Option<PathBuf> {
        self.preprocess.stopwords_path.as_ref().map(|p| expand_path(p.to_string_lossy()))
    }

    /// Resolve every relative path in the settings against `base`.
    pub fn rebase(mut self, base: &Path) -> Self {
        self.corpus.path = resolve_with_base(base, self.corpus.path.to_string_lossy());
        self.cache.dir = resolve_with_base(base, self.cache.dir.to_string_lossy());
        self.preprocess.lexicon_path = self
            .preprocess
            .lexicon_path
            .map(|p| resolve_with_base(base, p.to_string_lossy()));
        self.preprocess.stopwords_path = self
            .preprocess
            .stopwords_path
            .map(|p| resolve_with_base(base, p.to_string_lossy()));
        self
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
