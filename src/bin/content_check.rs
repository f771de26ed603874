use anyhow::{Context, Result};
use clap::Parser;
use pmstandards::config::Config;
use pmstandards::content::ContentPayload;
use pmstandards::documents::DocumentRegistry;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Parser)]
#[command(name = "content_check")]
#[command(about = "Validate a content payload and summarize its citations")]
struct Cli {
    content_path: String,
    /// Config file whose document offsets are applied when resolving citations
    #[arg(short, long)]
    config: Option<String>,
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    repository_items: usize,
    comparisons: Vec<String>,
    similarities: usize,
    differences: usize,
    unique_elements: usize,
    scenarios: Vec<String>,
    citations: usize,
    citations_per_document: BTreeMap<String, usize>,
    unresolved: Vec<String>,
}

fn summarize(payload: &ContentPayload, documents: &DocumentRegistry) -> Summary {
    let citations = payload.citations();

    let mut per_document = BTreeMap::new();
    let mut unresolved = Vec::new();
    for citation in &citations {
        *per_document.entry(citation.standard.to_string()).or_insert(0) += 1;
        if let Err(e) = documents.resolve_id(citation.standard, citation.page) {
            unresolved.push(e.to_string());
        }
    }

    Summary {
        repository_items: payload.repository.len(),
        comparisons: payload.comparisons.keys().cloned().collect(),
        similarities: payload.insights.similarities.len(),
        differences: payload.insights.differences.len(),
        unique_elements: payload.insights.unique.len(),
        scenarios: payload.tailored_processes.keys().cloned().collect(),
        citations: citations.len(),
        citations_per_document: per_document,
        unresolved,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = Path::new(&cli.content_path);

    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }

    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let payload = ContentPayload::from_json(&raw).with_context(|| format!("invalid payload {}", path.display()))?;

    let documents = match &cli.config {
        Some(config) => DocumentRegistry::with_offsets(&Config::new(Path::new(config))?.offsets()),
        None => DocumentRegistry::default(),
    };

    let summary = summarize(&payload, &documents);
    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", serde_json::to_string(&summary)?);
    }

    if !summary.unresolved.is_empty() {
        anyhow::bail!("{} citation(s) do not resolve to a PDF page", summary.unresolved.len());
    }
    Ok(())
}
