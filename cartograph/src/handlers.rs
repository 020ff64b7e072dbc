use anyhow::{Context, Result, anyhow};
use cartograph_core::crawl::{CrawlOptions, execute_crawl};
use cartograph_core::report::{
    ReportFormat, broken_links, generate_report, load_snapshot, save_report, write_snapshot,
};
use cartograph_scanner::ResourceGraph;
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

pub fn print_banner() {
    println!(
        "{} {}",
        "cartograph".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("{}", "maps a web domain, one link at a time".dimmed());
    println!();
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Try to parse as-is. "localhost:3000" parses with a "localhost" scheme,
    // so anything that isn't http(s) gets the prefix too.
    if let Ok(url) = Url::parse(line)
        && matches!(url.scheme(), "http" | "https")
        && url.has_host()
    {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    match Url::parse(&with_scheme) {
        Ok(url) if url.has_host() => Some(with_scheme),
        _ => None,
    }
}

/// Expands a leading `~` in a user supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn report_format_from_args(args: &ArgMatches) -> ReportFormat {
    args.get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}

/// Turns the `crawl` subcommand's arguments into crawl options.
pub fn crawl_options_from_args(args: &ArgMatches) -> Result<CrawlOptions> {
    let raw_url = args
        .get_one::<String>("url")
        .ok_or_else(|| anyhow!("--url is required"))?;
    let url = parse_url_line(raw_url).ok_or_else(|| anyhow!("Invalid URL '{}'", raw_url))?;

    let mut options = CrawlOptions::new(url);
    if let Some(agent) = args.get_one::<String>("agent") {
        options.agent = agent.clone();
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        options.timeout_secs = *timeout;
    }
    options.max_fetches = args.get_one::<usize>("max-fetches").copied();
    options.show_progress_bars = !args.get_flag("quiet");

    Ok(options)
}

pub async fn handle_crawl(args: &ArgMatches) -> Result<()> {
    let options = crawl_options_from_args(args)?;
    let quiet = args.get_flag("quiet");
    let format = report_format_from_args(args);
    let output_dir = expand_path(
        args.get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or("."),
    );

    if !quiet {
        print_divider();
        println!("{} {}", "Crawling".bright_white().bold(), options.url.bright_white());
        println!("{} {}", "Agent:".blue(), options.agent);
        println!("{} {}s", "Timeout:".blue(), options.timeout_secs);
        if let Some(max) = options.max_fetches {
            println!("{} {}", "Fetch limit:".blue(), max);
        }
        print_divider();
        println!();
    }

    let graph = execute_crawl(options).await.map_err(|e| anyhow!(e))?;

    debug!("writing site map to {}", output_dir.display());
    let path = write_snapshot(graph.as_ref(), &output_dir)
        .with_context(|| format!("Failed to write site map to {}", output_dir.display()))?;

    let report = generate_report(graph.as_ref(), format).map_err(|e| anyhow!(e))?;
    print!("{}", report);

    if !quiet {
        let broken = broken_links(graph.as_ref()).len();
        println!();
        println!(
            "{} {} resources, {} links, {} broken",
            "✓".green().bold(),
            graph.resource_count(),
            graph.link_count(),
            broken
        );
        println!("{} Site map saved to {}", "✓".green().bold(), path.display());
    }

    Ok(())
}

pub fn handle_report(args: &ArgMatches) -> Result<()> {
    let input = args
        .get_one::<PathBuf>("input")
        .ok_or_else(|| anyhow!("--input is required"))?;
    let format = report_format_from_args(args);

    let snapshot = load_snapshot(input).map_err(|e| anyhow!(e))?;
    let report = generate_report(&snapshot, format).map_err(|e| anyhow!(e))?;

    match args.get_one::<String>("output") {
        Some(output) => {
            let path = expand_path(output);
            save_report(&report, &path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            if !args.get_flag("quiet") {
                println!("{} Report saved to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}
