// Report generation from a crawled site graph

use cartograph_scanner::{GraphSnapshot, ResourceGraph};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// A resource that answered with an error status, and who links to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    pub status_code: u16,
    pub refered_by: Vec<String>,
}

/// Resource counts per status class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub success: usize,
    pub redirect: usize,
    pub client_error: usize,
    pub server_error: usize,
    pub other: usize,
    pub unfetched: usize,
}

impl StatusSummary {
    pub fn of(graph: &dyn ResourceGraph) -> Self {
        let mut summary = StatusSummary::default();
        graph.walk(&mut |resource| {
            match resource.status {
                None => summary.unfetched += 1,
                Some(200..=299) => summary.success += 1,
                Some(300..=399) => summary.redirect += 1,
                Some(400..=499) => summary.client_error += 1,
                Some(500..=599) => summary.server_error += 1,
                Some(_) => summary.other += 1,
            }
            true
        });
        summary
    }
}

const CLASS_HEADINGS: [&str; 6] = [
    "2xx Success",
    "3xx Redirect",
    "4xx Client error",
    "5xx Server error",
    "Other",
    "Unfetched",
];

/// Index into [`CLASS_HEADINGS`].
fn status_class(status: Option<u16>) -> usize {
    match status {
        Some(200..=299) => 0,
        Some(300..=399) => 1,
        Some(400..=499) => 2,
        Some(500..=599) => 3,
        Some(_) => 4,
        None => 5,
    }
}

/// Every resource with a status of 400 or above, sorted by URL.
pub fn broken_links(graph: &dyn ResourceGraph) -> Vec<BrokenLink> {
    let mut broken = Vec::new();
    graph.walk(&mut |resource| {
        if let Some(status) = resource.status
            && status >= 400
        {
            broken.push(BrokenLink {
                url: resource.link.to_string(),
                status_code: status,
                refered_by: resource.refered_by.iter().cloned().collect(),
            });
        }
        true
    });
    broken.sort_by(|a, b| a.url.cmp(&b.url));
    broken
}

pub fn generate_report(graph: &dyn ResourceGraph, format: ReportFormat) -> Result<String, String> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(graph)),
        ReportFormat::Json => {
            generate_json_report(graph).map_err(|e| format!("Failed to generate JSON report: {}", e))
        }
        ReportFormat::Csv => Ok(generate_csv_report(graph)),
        ReportFormat::Markdown => Ok(generate_markdown_report(graph)),
    }
}

pub fn generate_text_report(graph: &dyn ResourceGraph) -> String {
    let snapshot = graph.snapshot();
    let summary = StatusSummary::of(&snapshot);
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("\n                          CARTOGRAPH SITE MAP REPORT\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!("Resources:    {}\n", snapshot.resource_count));
    report.push_str(&format!("Links:        {}\n", snapshot.link_count));
    report.push_str(&format!("  2xx:        {}\n", summary.success));
    report.push_str(&format!("  3xx:        {}\n", summary.redirect));
    report.push_str(&format!("  4xx:        {}\n", summary.client_error));
    report.push_str(&format!("  5xx:        {}\n", summary.server_error));
    if summary.other > 0 {
        report.push_str(&format!("  other:      {}\n", summary.other));
    }
    report.push_str(&format!("  unfetched:  {}\n\n", summary.unfetched));

    report.push_str(RULE);
    report.push_str("\nSITE MAP\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    if snapshot.resources.is_empty() {
        report.push_str("  (empty)\n\n");
    }
    for (class, heading) in CLASS_HEADINGS.iter().enumerate() {
        let mut members = snapshot
            .resources
            .iter()
            .filter(|(_, resource)| status_class(resource.status) == class)
            .peekable();
        if members.peek().is_none() {
            continue;
        }

        report.push_str(&format!("  {}\n", heading));
        for (url, resource) in members {
            report.push_str(&format!(
                "    {} {}  [in {}, out {}]\n",
                colored_status(resource.status),
                url,
                resource.refered_by.len(),
                resource.refers_to.len()
            ));
        }
        report.push('\n');
    }

    let broken = broken_links(&snapshot);
    if !broken.is_empty() {
        report.push_str(RULE);
        report.push_str("\nBROKEN LINKS\n");
        report.push_str(RULE);
        report.push_str("\n\n");

        for link in &broken {
            report.push_str(&format!("  {} {}\n", colored_status(Some(link.status_code)), link.url));
            for referrer in &link.refered_by {
                report.push_str(&format!("      linked from {}\n", referrer));
            }
        }
        report.push('\n');
    }

    report.push_str(RULE);
    report.push_str("\nGenerated by Cartograph\n");

    report
}

pub fn generate_json_report(graph: &dyn ResourceGraph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&graph.snapshot())
}

pub fn generate_csv_report(graph: &dyn ResourceGraph) -> String {
    let mut report = String::from("url,status,refers_to,refered_by\n");
    for (url, resource) in graph.snapshot().resources {
        report.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&url),
            plain_status(resource.status),
            resource.refers_to.len(),
            resource.refered_by.len()
        ));
    }
    report
}

pub fn generate_markdown_report(graph: &dyn ResourceGraph) -> String {
    let snapshot = graph.snapshot();
    let mut report = String::from("# Site Map\n\n");

    report.push_str(&format!(
        "**Resources:** {} | **Links:** {}\n\n",
        snapshot.resource_count, snapshot.link_count
    ));

    report.push_str("| URL | Status | Refers to | Referred by |\n");
    report.push_str("|-----|--------|-----------|-------------|\n");
    for (url, resource) in &snapshot.resources {
        report.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            url.replace('|', "\\|"),
            plain_status(resource.status),
            resource.refers_to.len(),
            resource.refered_by.len()
        ));
    }

    let broken = broken_links(&snapshot);
    if !broken.is_empty() {
        report.push_str("\n## Broken Links\n\n");
        for link in &broken {
            report.push_str(&format!("- `{}` {}\n", link.status_code, link.url));
            for referrer in &link.refered_by {
                report.push_str(&format!("  - linked from {}\n", referrer));
            }
        }
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// `site_map_<YYYY-MM-DD-HH-MM>.json` for the given local time.
pub fn snapshot_file_name(at: chrono::DateTime<chrono::Local>) -> String {
    format!("site_map_{}.json", at.format("%Y-%m-%d-%H-%M"))
}

/// Writes the graph as pretty JSON into `dir` and returns the file's path.
pub fn write_snapshot(graph: &dyn ResourceGraph, dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(snapshot_file_name(chrono::Local::now()));
    let json = serde_json::to_string_pretty(&graph.snapshot())?;
    save_report(&json, &path)?;
    Ok(path)
}

pub fn load_snapshot(path: &Path) -> Result<GraphSnapshot, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

fn colored_status(status: Option<u16>) -> String {
    match status {
        Some(code @ 100..=199) => code.to_string().white().to_string(),
        Some(code @ 200..=299) => code.to_string().green().to_string(),
        Some(code @ 300..=399) => code.to_string().cyan().to_string(),
        Some(code @ 400..=499) => code.to_string().yellow().to_string(),
        Some(code @ 500..=599) => code.to_string().red().to_string(),
        Some(code) => code.to_string(),
        None => "---".dimmed().to_string(),
    }
}

fn plain_status(status: Option<u16>) -> String {
    status.map_or_else(|| "-1".to_string(), |code| code.to_string())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
