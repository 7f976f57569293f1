//! Build the menu feed for a chain page.
//!
//! Usage:
//!   cargo run --release --bin obento_feed
//!   cargo run --release --bin obento_feed -- --source-file sample/dondon_menu.html --output feed.json
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for per-block detail.

use obento_feed::config::{MenuSource, PipelineConfig};
use obento_feed::fetch::CachedFetcher;
use obento_feed::pipeline::MenuPipeline;
use obento_feed::text::Transliterator;
use obento_feed::Result;
use std::fs;
use std::path::PathBuf;

struct CliConfig {
    source_file: Option<PathBuf>,
    cache: Option<PathBuf>,
    no_cache: bool,
    output: Option<PathBuf>,
    pretty: bool,
}

impl CliConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            source_file: None,
            cache: None,
            no_cache: false,
            output: None,
            pretty: true,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--source-file" => {
                    i += 1;
                    if i < args.len() {
                        config.source_file = Some(PathBuf::from(&args[i]));
                    }
                },
                "--cache" => {
                    i += 1;
                    if i < args.len() {
                        config.cache = Some(PathBuf::from(&args[i]));
                    }
                },
                "--no-cache" => config.no_cache = true,
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        config.output = Some(PathBuf::from(&args[i]));
                    }
                },
                "--compact" => config.pretty = false,
                "--help" | "-h" => {
                    eprintln!(
                        "Usage: {} [--source-file <html>] [--cache <path> | --no-cache] [--output <json>] [--compact]",
                        args[0]
                    );
                    std::process::exit(0);
                },
                other => eprintln!("Ignoring unknown argument: {}", other),
            }
            i += 1;
        }

        config
    }

    fn source(&self) -> MenuSource {
        let mut source = MenuSource::dondon();
        if let Some(path) = &self.source_file {
            source = source.with_url(format!("file:{}", path.display())).without_cache();
        }
        if let Some(cache) = &self.cache {
            source = source.with_cache_path(cache);
        }
        if self.no_cache {
            source = source.without_cache();
        }
        source
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = CliConfig::from_args();
    let source = cli.source();

    let transliterator = Transliterator::new()?;
    let pipeline = MenuPipeline::with_config(&transliterator, PipelineConfig::new().with_pretty(cli.pretty))?;
    let fetcher = CachedFetcher::new()?;

    let Some(feed) = pipeline.fetch_feed(&source, &fetcher)? else {
        eprintln!("Error: {} could not be fetched", source.url);
        std::process::exit(1);
    };

    let json = pipeline.render(&feed)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!("Wrote {} entries to {}", feed.entries.len(), path.display());
        },
        None => println!("{}", json),
    }

    Ok(())
}
