use anyhow::Context;
use clap::Parser;
use mdx_search::cli::{Cli, Commands};
use mdx_search::types::{IndexDocument, SearchResult};
use mdx_search::{
    Config, ContentScanner, HttpIndexSource, IndexCache, IndexSource, LocalIndexSource,
    SearchEngine,
};
use std::fmt::Write as _;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mdx_search::tracing::init(cli.log_format);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(content_dir) = cli.content_dir {
        config.content_dir = content_dir;
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            let cache = Arc::new(IndexCache::new(ContentScanner::from_config(&config)));
            mdx_search::server::run(cache, config.bind, &config.endpoint).await
        }
        Commands::Index { pretty } => {
            let cache = IndexCache::new(ContentScanner::from_config(&config));
            let index = cache.get().await?;
            let document = IndexDocument { index };
            let json = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{}", json);
            Ok(())
        }
        Commands::Search {
            query,
            limit,
            url,
            json,
        } => {
            let source: Arc<dyn IndexSource> = match url.or_else(|| config.index_url.clone()) {
                Some(url) => Arc::new(HttpIndexSource::new(url)?),
                None => Arc::new(LocalIndexSource::new(Arc::new(IndexCache::new(
                    ContentScanner::from_config(&config),
                )))),
            };
            let engine = SearchEngine::from_source(source);
            let limit = limit.unwrap_or(config.default_limit);
            let results = engine
                .perform_search(&query, limit)
                .await
                .context("Search failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", format_results(&query, &results));
            }
            Ok(())
        }
    }
}

fn format_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No results found for '{}'.\n", query);
    }

    let mut output = format!("Search results for '{}':\n\n", query);
    for (idx, result) in results.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. {} ({}) - score: {}",
            idx + 1,
            result.title,
            result.path.as_deref().unwrap_or("-"),
            result.score
        );
        if let Some(heading) = &result.heading_text {
            let _ = writeln!(output, "   § {}", heading);
        }
        if let Some(description) = &result.description {
            let _ = writeln!(output, "   {}", description);
        }
        output.push('\n');
    }
    output
}
