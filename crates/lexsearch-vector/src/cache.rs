//! On-disk cache of a fitted vector space.
//!
//! Three JSON artifacts live in the cache directory: the vectorizer, the
//! term-document matrix and a manifest. The manifest records the corpus
//! fingerprint, the preprocessor identity and the unit ids the matrix rows
//! belong to; a cache is reused only when all of them match the current run.
//! Each file is written to a temp file and renamed into place, manifest last,
//! so an interrupted save leaves no manifest that vouches for it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use lexsearch_core::corpus::Corpus;
use lexsearch_core::error::Error;

use crate::space::VectorSpace;
use crate::sparse::CsrMatrix;
use crate::tfidf::TfidfVectorizer;

pub const FORMAT_VERSION: u32 = 1;
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const MATRIX_FILE: &str = "matrix.json";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    pub corpus_fingerprint: String,
    pub preprocessor_id: String,
    pub unit_ids: Vec<String>,
    pub built_at: DateTime<Utc>,
}

impl Manifest {
    /// Reason this manifest cannot vouch for the current corpus, if any.
    fn staleness(&self, corpus: &Corpus, preprocessor_id: &str) -> Option<&'static str> {
        if self.format_version != FORMAT_VERSION {
            Some("cache format changed")
        } else if self.corpus_fingerprint != corpus.fingerprint() {
            Some("corpus changed")
        } else if self.preprocessor_id != preprocessor_id {
            Some("preprocessing changed")
        } else if self.unit_ids != corpus.unit_ids() {
            Some("unit ids differ")
        } else {
            None
        }
    }
}

pub struct TfidfCache {
    dir: PathBuf,
}

impl TfidfCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(VECTORIZER_FILE)
    }

    pub fn matrix_path(&self) -> PathBuf {
        self.dir.join(MATRIX_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    pub fn exists(&self) -> bool {
        self.vectorizer_path().is_file() && self.matrix_path().is_file() && self.manifest_path().is_file()
    }

    /// Load the cached space if it was built from this corpus with this
    /// preprocessor. Missing, stale or unreadable caches yield `None`.
    pub fn load(&self, corpus: &Corpus, preprocessor_id: &str) -> Option<VectorSpace> {
        match self.try_load(corpus, preprocessor_id) {
            Ok(space) => space,
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "ignoring unreadable cache");
                None
            }
        }
    }

    fn try_load(&self, corpus: &Corpus, preprocessor_id: &str) -> Result<Option<VectorSpace>> {
        if !self.exists() {
            tracing::debug!(dir = %self.dir.display(), "no cache present");
            return Ok(None);
        }
        let manifest: Manifest = read_json(&self.manifest_path())?;
        if let Some(reason) = manifest.staleness(corpus, preprocessor_id) {
            tracing::warn!(dir = %self.dir.display(), reason, built_at = %manifest.built_at, "cache is stale");
            return Ok(None);
        }
        let vectorizer: TfidfVectorizer = read_json(&self.vectorizer_path())?;
        vectorizer.validate()?;
        let matrix: CsrMatrix = read_json(&self.matrix_path())?;
        matrix.validate()?;
        Ok(Some(VectorSpace::new(manifest.unit_ids, matrix, vectorizer)?))
    }

    pub fn save(&self, space: &VectorSpace, corpus: &Corpus, preprocessor_id: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        // Invalidate before touching the artifacts
        match fs::remove_file(self.manifest_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(self.manifest_path(), e).into()),
        }
        write_json(&self.dir, &self.vectorizer_path(), space.vectorizer())?;
        write_json(&self.dir, &self.matrix_path(), space.matrix())?;
        let manifest = Manifest {
            format_version: FORMAT_VERSION,
            corpus_fingerprint: corpus.fingerprint().to_string(),
            preprocessor_id: preprocessor_id.to_string(),
            unit_ids: space.unit_ids().into_iter().map(str::to_string).collect(),
            built_at: Utc::now(),
        };
        write_json(&self.dir, &self.manifest_path(), &manifest)?;
        tracing::debug!(dir = %self.dir.display(), "cache written");
        Ok(())
    }

    pub fn read_manifest(&self) -> Result<Manifest> {
        read_json(&self.manifest_path())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::Cache(format!("{}: {}", path.display(), e)).into())
}

fn write_json<T: Serialize>(dir: &Path, path: &Path, value: &T) -> Result<()> {
    let tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer(&mut writer, value).map_err(|e| Error::Cache(format!("{}: {}", path.display(), e)))?;
        writer.flush().map_err(|e| Error::io(path, e))?;
    }
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
