use figment::{
    providers::{Format, Toml},
    Figment,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use lexsearch_core::config::{Config, Settings, DEFAULT_QUERY};
use lexsearch_core::corpus::{load_corpus, parse_corpus};
use lexsearch_core::error::Error;
use lexsearch_core::types::UnitKind;

const CORPUS: &str = r#"
cleni:
  - id_elementa: clen_1
    poglavje:
      naslov: Splošne določbe
    oddelek: null
    naslov: Predmet urejanja
    vsebina: Ta uredba določa pravila.
  - id_elementa: clen_2
    poglavje:
      naslov: Prepovedane prakse
    oddelek:
      naslov: Prvi oddelek
    naslov: Prepovedi
    vsebina: Prepovedano je dajanje na trg.
tocke:
  - id_elementa: tocka_1
    vsebina: Umetna inteligenca je hitro razvijajoča se tehnologija.
  - id_elementa: tocka_2
    vsebina: Uredba se uporablja za ponudnike.
"#;

#[test]
fn load_corpus_orders_articles_before_points() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ai_act.yaml");
    fs::write(&path, CORPUS).unwrap();

    let corpus = load_corpus(&path).expect("load");

    assert_eq!(corpus.unit_ids(), vec!["clen_1", "clen_2", "tocka_1", "tocka_2"]);
    let kinds: Vec<UnitKind> = corpus.units().iter().map(|u| u.kind).collect();
    assert_eq!(kinds, vec![UnitKind::Article, UnitKind::Article, UnitKind::Point, UnitKind::Point]);
}

#[test]
fn article_text_joins_titles_and_body() {
    let corpus = parse_corpus(CORPUS).expect("parse");
    let texts = corpus.indexing_texts();

    // No section title when `oddelek` is null
    assert_eq!(texts[0], "Splošne določbe\nPredmet urejanja\nTa uredba določa pravila.");
    assert_eq!(texts[1], "Prepovedane prakse\nPrvi oddelek\nPrepovedi\nPrepovedano je dajanje na trg.");
    // Points index their body only
    assert_eq!(texts[2], "Umetna inteligenca je hitro razvijajoča se tehnologija.");
}

#[test]
fn untitled_section_is_treated_as_absent() {
    let article = |section: &str| {
        format!(
            "cleni:\n  - id_elementa: a\n    poglavje: {{naslov: P}}\n    oddelek: {section}\n    naslov: N\n    vsebina: V\n"
        )
    };
    for section in ["{}", "{opomba: x}", "\"\"", "false"] {
        let corpus = parse_corpus(&article(section)).unwrap_or_else(|e| panic!("{section}: {e}"));
        assert_eq!(corpus.indexing_texts(), vec!["P\nN\nV"], "oddelek: {section}");
    }
    let corpus = parse_corpus(&article("{naslov: O}")).unwrap();
    assert_eq!(corpus.indexing_texts(), vec!["P\nO\nN\nV"]);
}

#[test]
fn missing_points_collection_is_empty() {
    let corpus = parse_corpus(
        "cleni:\n  - id_elementa: a\n    poglavje: {naslov: P}\n    naslov: N\n    vsebina: V\n",
    )
    .expect("parse");
    assert_eq!(corpus.len(), 1);
}

#[test]
fn malformed_corpus_is_rejected() {
    let err = parse_corpus("cleni:\n  - id_elementa: a\n").unwrap_err();
    assert!(matches!(err, Error::CorpusParse(_)), "got {err:?}");

    let err = parse_corpus("tocke: []\n").unwrap_err();
    assert!(matches!(err, Error::CorpusParse(_)), "articles are required, got {err:?}");
}

#[test]
fn duplicate_ids_are_rejected() {
    let src = "cleni: []\ntocke:\n  - {id_elementa: x, vsebina: a}\n  - {id_elementa: x, vsebina: b}\n";
    let err = parse_corpus(src).unwrap_err();
    assert!(matches!(err, Error::CorpusParse(ref m) if m.contains("duplicate")), "got {err:?}");
}

#[test]
fn missing_corpus_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = load_corpus(&tmp.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "got {err:?}");
}

#[test]
fn settings_default_without_any_config() {
    figment::Jail::expect_with(|_jail| {
        let settings = Config::load_for_env("test")
            .and_then(|c| c.settings())
            .map_err(|e| e.to_string())?;
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.search.default_query, DEFAULT_QUERY);
        assert_eq!(settings.cache_dir(), PathBuf::from("embeddings/tfidf"));
        assert!(settings.cache.enabled);
        assert_eq!(settings.search.top_n, None);
        Ok(())
    });
}

#[test]
fn env_file_and_variables_override_base_config() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
            [corpus]
            path = "data/base.yaml"
            [search]
            top_n = 5
            "#,
        )?;
        jail.create_file("config.test.toml", "[corpus]\npath = \"data/test.yaml\"\n")?;
        jail.set_env("APP_CACHE__DIR", "/tmp/lexsearch-cache");

        let config = Config::load_for_env("test").map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.corpus_path(), PathBuf::from("data/test.yaml"));
        assert_eq!(settings.cache_dir(), PathBuf::from("/tmp/lexsearch-cache"));
        assert_eq!(settings.search.top_n, Some(5));

        let top_n: usize = config.get("search.top_n").map_err(|e| e.to_string())?;
        assert_eq!(top_n, 5);
        Ok(())
    });
}

#[test]
fn from_figment_extracts_layered_providers() {
    let figment = Figment::new()
        .merge(Toml::string("[search]\ntop_n = 3\n[cache]\nenabled = false\n"))
        .merge(Toml::string("[search]\ntop_n = 7\n"));
    let settings = Config::from_figment(figment).settings().unwrap();

    assert_eq!(settings.search.top_n, Some(7));
    assert!(!settings.cache.enabled);
    assert_eq!(settings.corpus, Settings::default().corpus);
}

#[test]
fn empty_corpus_path_is_invalid() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[corpus]\npath = \"\"\n")?;
        assert!(Config::load_for_env("dev").is_err());
        Ok(())
    });
}

#[test]
fn rebase_resolves_relative_paths_only() {
    let mut settings = Settings::default();
    settings.preprocess.lexicon_path = Some(PathBuf::from("/abs/lemmas.tsv"));
    let settings = settings.rebase(std::path::Path::new("/work"));

    assert_eq!(settings.corpus_path(), PathBuf::from("/work/ai_act.yaml"));
    assert_eq!(settings.cache_dir(), PathBuf::from("/work/embeddings/tfidf"));
    assert_eq!(settings.lexicon_path(), Some(PathBuf::from("/abs/lemmas.tsv")));
    assert_eq!(settings.stopwords_path(), None);
}
