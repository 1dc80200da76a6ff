//! lexsearch-cli
//!
//! Console entry points over the TF-IDF search: `get_relevant_results`
//! prepares (or loads) the vector space, ranks the corpus for one query and
//! writes the report.

use anyhow::{bail, Result};
use std::io::Write;

use lexsearch_core::config::Settings;
use lexsearch_text::Preprocessor;
use lexsearch_vector::prepare_data;

pub mod report;

pub use report::format_results;

/// Install the stderr subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Rank the corpus for `query` and write the report to `out`.
///
/// A missing query falls back to `search.default_query` and a missing
/// `top_n` to `search.top_n` (unset means every unit).
pub fn get_relevant_results<W: Write>(
    settings: &Settings,
    preprocessor: &Preprocessor,
    query: Option<&str>,
    top_n: Option<usize>,
    out: &mut W,
) -> Result<()> {
    let query = query.unwrap_or(settings.search.default_query.as_str());
    let top_n = top_n.or(settings.search.top_n);
    let space = prepare_data(settings, preprocessor)?;
    let hits = space.search(query, preprocessor, top_n)?;
    tracing::debug!(query, hits = hits.len(), "ranked corpus");
    out.write_all(format_results(&hits).as_bytes())?;
    out.flush()?;
    Ok(())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    pub query: Option<String>,
    pub top_n: Option<usize>,
    pub help: bool,
}

pub const SEARCH_USAGE: &str = "Usage: lexsearch [query] [top_n] [--top N]";

/// Parse `[query] [top_n]` positionals plus `--top N` / `-n N`.
pub fn parse_search_args<I, S>(args: I) -> Result<SearchArgs>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    let mut parsed = SearchArgs::default();
    let mut positionals = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => parsed.help = true,
            "--top" | "-n" => {
                let Some(value) = args.get(i + 1) else { bail!("{} requires a number", args[i]) };
                parsed.top_n = Some(parse_top_n(value)?);
                i += 1;
            }
            arg if arg.starts_with("--") => bail!("unknown option {arg}"),
            arg => positionals.push(arg.to_string()),
        }
        i += 1;
    }
    let mut positionals = positionals.into_iter();
    parsed.query = positionals.next();
    if let Some(value) = positionals.next() {
        if parsed.top_n.is_some() {
            bail!("top_n given twice");
        }
        parsed.top_n = Some(parse_top_n(&value)?);
    }
    if let Some(extra) = positionals.next() {
        bail!("unexpected argument {extra:?}");
    }
    Ok(parsed)
}

fn parse_top_n(value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|_| anyhow::anyhow!("top_n must be a non-negative integer, got {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_use_configured_defaults() {
        assert_eq!(parse_search_args(Vec::<String>::new()).unwrap(), SearchArgs::default());
    }

    #[test]
    fn positional_query_and_top_n() {
        let args = parse_search_args(["umetna inteligenca", "3"]).unwrap();
        assert_eq!(args.query.as_deref(), Some("umetna inteligenca"));
        assert_eq!(args.top_n, Some(3));
    }

    #[test]
    fn top_flag_anywhere() {
        let args = parse_search_args(["--top", "0", "pravica"]).unwrap();
        assert_eq!(args.query.as_deref(), Some("pravica"));
        assert_eq!(args.top_n, Some(0));
        assert_eq!(parse_search_args(["-n", "2"]).unwrap().top_n, Some(2));
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert!(parse_search_args(["q", "pet"]).is_err());
        assert!(parse_search_args(["q", "-1"]).is_err());
        assert!(parse_search_args(["--top"]).is_err());
        assert!(parse_search_args(["q", "1", "extra"]).is_err());
        assert!(parse_search_args(["q", "1", "--top", "2"]).is_err());
        assert!(parse_search_args(["--verbose"]).is_err());
    }

    #[test]
    fn help_flag() {
        assert!(parse_search_args(["-h"]).unwrap().help);
    }
}
