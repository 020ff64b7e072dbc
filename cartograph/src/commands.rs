use cartograph_core::crawl::DEFAULT_AGENT;
use clap::{arg, command};
use std::path::PathBuf;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

const FORMATS: [&str; 5] = ["text", "json", "csv", "markdown", "md"];

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("cartograph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("cartograph")
        .about("Maps a single web domain into a graph of resources and links")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner, progress and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" ... "Raise log verbosity (-v debug, -vv trace)")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl every same-domain resource reachable from the root and the \
                robots.txt sitemaps, and save the resulting site map.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The domain to crawl, e.g. https://example.com"),
                )
                .arg(
                    arg!(-a --"agent" <AGENT>)
                        .required(false)
                        .help("User agent sent with every request and matched against robots.txt")
                        .default_value(DEFAULT_AGENT),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-request timeout in seconds")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"max-fetches" <N>)
                        .required(false)
                        .help("Stop after this many requests (default: crawl until done)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-o --"output" <DIR>)
                        .required(false)
                        .help("Directory the site map JSON is written to")
                        .default_value("."),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown")
                        .value_parser(FORMATS)
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("report")
                .about("Render a report from a previously saved site map")
                .arg(
                    arg!(-i --"input" <FILE>)
                        .required(true)
                        .help("Path to a site_map_*.json file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown")
                        .value_parser(FORMATS)
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <FILE>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                ),
        )
}
