//! CLI command implementations.

use crate::config::Config;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use itemgraph_core::{
    dedupe_records, load_items, load_traders, read_json, write_json, Corrections, ItemRecord,
};
use itemgraph_graph::{BuildReport, GraphStats, GraphView, InvariantViolation};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Violations printed before the rest are summarized.
const MAX_LISTED: usize = 10;

/// Flags for `build`; each one overrides the matching config entry.
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub items: Option<PathBuf>,
    pub traders: Option<PathBuf>,
    pub corrections: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub no_traders: bool,
}

/// Initialize itemgraph in a directory.
pub fn init(path: &Path) -> Result<()> {
    if !Config::init(path)? {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    println!("{} Initialized itemgraph in {}", "✓".green(), path.display());
    println!("  Run {} to build the relation graph", "itemgraph build".cyan());

    Ok(())
}

/// Load records, build the graph and write it out.
pub fn build(root: &Path, options: &BuildOptions) -> Result<()> {
    let config = Config::load(root)?;
    let items_path = options.items.clone().unwrap_or(config.items);
    let traders_path = options.traders.clone().unwrap_or(config.traders);
    let corrections_path = options.corrections.clone().unwrap_or(config.corrections);
    let output = options.output.clone().unwrap_or(config.output);

    println!("{}", "Building relation graph...".cyan());
    let start = Instant::now();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Loading records...");

    let mut items = load_items(&items_path)?;

    if corrections_path.exists() {
        spinner.set_message("Applying corrections...");
        let corrections = Corrections::load(&corrections_path)?;
        if corrections.is_empty() {
            tracing::info!("No corrections in {}", corrections_path.display());
        } else {
            let updated = corrections.apply(&mut items);
            tracing::info!("Applied {} corrections", updated);
        }
    }

    let traders = if options.no_traders {
        None
    } else {
        if options.traders.is_some() && !traders_path.exists() {
            tracing::warn!(
                "Trader records {} not found, building without traders",
                traders_path.display()
            );
        }
        load_traders(&traders_path)?
    };

    spinner.set_message("Resolving edges...");
    let graph = itemgraph_graph::build(&items, traders.as_deref());
    let view = graph.view();
    write_json(&output, &view)?;

    spinner.finish_and_clear();

    println!(
        "{} Built {} nodes and {} edges in {}ms",
        "✓".green(),
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan(),
        start.elapsed().as_millis()
    );
    println!("{} Wrote {}", "✓".green(), output.display());
    println!();
    print_stats(&graph.stats());
    print_report(graph.report());

    let violations = view.validate();
    if !violations.is_empty() {
        println!(
            "\n{} {} invariant violations in the built graph",
            "⚠".yellow(),
            violations.len()
        );
        print_violations(&violations);
    }

    Ok(())
}

/// Print statistics for a graph file.
pub fn stats(path: &Path, json_output: bool) -> Result<()> {
    let view: GraphView = read_json(path)?;
    let stats = view.stats();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }

    Ok(())
}

/// Check a graph file. Fails if any invariant is broken.
pub fn validate(path: &Path) -> Result<()> {
    let view: GraphView = read_json(path)?;
    let violations = view.validate();

    if violations.is_empty() {
        println!(
            "{} {} nodes, {} edges, no violations",
            "✓".green(),
            view.nodes.len(),
            view.edge_count()
        );
        return Ok(());
    }

    print_violations(&violations);
    Err(format!("{} invariant violations in {}", violations.len(), path.display()).into())
}

/// Keep the first record of each name.
pub fn dedupe(input: &Path, output: Option<&Path>) -> Result<()> {
    let records: Vec<ItemRecord> = read_json(input)?;
    let before = records.len();
    let deduped = dedupe_records(records);

    for name in &deduped.duplicates {
        tracing::debug!("Removed duplicate '{}'", name);
    }

    let output = output.unwrap_or(input);
    write_json(output, &deduped.records)?;

    println!(
        "{} Kept {} of {} records ({} duplicates, {} without a name removed)",
        "✓".green(),
        deduped.records.len().to_string().cyan(),
        before,
        deduped.duplicates.len(),
        deduped.unnamed
    );
    println!("{} Wrote {}", "✓".green(), output.display());

    Ok(())
}

fn print_stats(stats: &GraphStats) {
    println!("{}", "Graph".bold());
    println!(
        "  Nodes: {} ({} items, {} traders, {} stubs)",
        stats.node_count.to_string().cyan(),
        stats.item_count,
        stats.trader_count,
        stats.stub_count
    );
    println!(
        "  Edges: {} ({:.2} per node)",
        stats.edge_count.to_string().cyan(),
        stats.average_edges_per_node()
    );
    for (relation, count) in &stats.relations {
        println!("    {:<14} {}", relation.to_string().yellow(), count);
    }
}

fn print_report(report: &BuildReport) {
    println!("{}", "Build".bold());
    println!(
        "  Forward edges: {}, reverse edges: {}, stubs: {}",
        report.forward_edges, report.reverse_edges, report.stubs_created
    );

    let skipped = [
        ("records without a name", report.records_skipped),
        ("entries without a name", report.entries_dropped),
        ("upgrades without levels", report.upgrades_skipped),
        ("duplicate edges", report.duplicate_edges),
    ];
    for (what, count) in skipped {
        if count > 0 {
            println!("  {} Skipped {} {}", "⚠".yellow(), count, what);
        }
    }

    if report.text_quantities > 0 {
        println!(
            "  {} {} quantities kept as text",
            "⚠".yellow(),
            report.text_quantities
        );
    }

    if !report.duplicate_records.is_empty() {
        println!(
            "  {} {} names had more than one record (first kept)",
            "⚠".yellow(),
            report.duplicate_records.len()
        );
        for name in report.duplicate_records.iter().take(5) {
            println!("    {}", name.dimmed());
        }
    }
}

fn print_violations(violations: &[InvariantViolation]) {
    for violation in violations.iter().take(MAX_LISTED) {
        println!("  {} {}", "✗".red(), violation);
    }
    if violations.len() > MAX_LISTED {
        println!("  ... and {} more", violations.len() - MAX_LISTED);
    }
}
