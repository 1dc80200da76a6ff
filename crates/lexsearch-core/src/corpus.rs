//! Loader for the regulation corpus.
//!
//! The source is a YAML document with two ordered collections, `cleni`
//! (articles) and `tocke` (points). Units come out articles first, then
//! points, each in source order. That order is the row order of the
//! term-document matrix built from it.

use figment::{
    providers::{Format, Yaml},
    value::Value,
    Figment,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{CorpusUnit, UnitKind};

#[derive(Debug, Deserialize)]
struct RawDocument {
    cleni: Vec<RawArticle>,
    #[serde(default)]
    tocke: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    id_elementa: RawId,
    poglavje: Titled,
    /// Any value; only a mapping with a `naslov` string counts as a section.
    #[serde(default)]
    oddelek: Option<Value>,
    naslov: String,
    vsebina: String,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    id_elementa: RawId,
    vsebina: String,
}

#[derive(Debug, Deserialize)]
struct Titled {
    naslov: String,
}

/// `id_elementa` is usually a string but plain numbers show up too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(s) => f.write_str(s),
            RawId::Signed(n) => write!(f, "{n}"),
            RawId::Unsigned(n) => write!(f, "{n}"),
        }
    }
}

impl RawArticle {
    fn section_title(&self) -> Option<&str> {
        self.oddelek.as_ref()?.find_ref("naslov")?.as_str()
    }

    fn indexing_text(&self) -> String {
        let mut parts = vec![self.poglavje.naslov.as_str()];
        if let Some(section) = self.section_title() {
            parts.push(section);
        }
        parts.push(self.naslov.as_str());
        parts.push(self.vsebina.as_str());
        parts.join("\n")
    }
}

/// The loaded corpus plus a fingerprint of the bytes it was parsed from.
#[derive(Debug, Clone)]
pub struct Corpus {
    units: Vec<CorpusUnit>,
    fingerprint: String,
}

impl Corpus {
    pub fn units(&self) -> &[CorpusUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit_ids(&self) -> Vec<String> {
        self.units.iter().map(|u| u.id.clone()).collect()
    }

    pub fn indexing_texts(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.text.as_str()).collect()
    }

    /// blake3 hex digest of the source document.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let corpus = parse_corpus_bytes(&bytes)?;
    tracing::debug!(path = %path.display(), units = corpus.len(), "loaded corpus");
    Ok(corpus)
}

pub fn parse_corpus(source: &str) -> Result<Corpus> {
    parse_corpus_bytes(source.as_bytes())
}

fn parse_corpus_bytes(bytes: &[u8]) -> Result<Corpus> {
    let source = std::str::from_utf8(bytes)
        .map_err(|e| Error::CorpusParse(format!("corpus is not valid UTF-8: {e}")))?;
    let raw: RawDocument = Figment::from(Yaml::string(source))
        .extract()
        .map_err(|e| Error::CorpusParse(e.to_string()))?;

    let articles = raw.cleni.iter().map(|a| CorpusUnit {
        id: a.id_elementa.to_string(),
        kind: UnitKind::Article,
        text: a.indexing_text(),
    });
    let points = raw.tocke.iter().map(|p| CorpusUnit {
        id: p.id_elementa.to_string(),
        kind: UnitKind::Point,
        text: p.vsebina.clone(),
    });
    let units: Vec<CorpusUnit> = articles.chain(points).collect();

    let mut seen = HashSet::new();
    for unit in &units {
        if !seen.insert(unit.id.as_str()) {
            return Err(Error::CorpusParse(format!("duplicate unit id '{}'", unit.id)));
        }
    }

    Ok(Corpus { units, fingerprint: blake3::hash(bytes).to_hex().to_string() })
}
