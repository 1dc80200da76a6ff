use std::env;
use std::io;

use lexsearch_cli::{get_relevant_results, init_logging, parse_search_args, SEARCH_USAGE};
use lexsearch_core::config::Config;
use lexsearch_text::Preprocessor;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = parse_search_args(env::args().skip(1)).map_err(|e| {
        eprintln!("{SEARCH_USAGE}");
        e
    })?;
    if args.help {
        println!("{SEARCH_USAGE}");
        return Ok(());
    }
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    let preprocessor = Preprocessor::from_settings(&settings)?;
    let stdout = io::stdout();
    get_relevant_results(&settings, &preprocessor, args.query.as_deref(), args.top_n, &mut stdout.lock())
}
