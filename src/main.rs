use clap::Parser;
use compute::Totals;
use env_logger::Env;
use graph::{colorize, FlowGraph, Palette};
use log::info;
use read::read_file;
use report::Report;
use std::path::PathBuf;
use write::{write_report, write_sankey};

mod compute;
mod data;
mod graph;
mod read;
mod report;
mod write;

/// Sums up a bank statement export by category and shows where the money went.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the csv file
    #[arg(short, long)]
    input: PathBuf,
    /// Also write the money flow as a Sankey diagram description (JSON) to this path
    #[arg(short, long)]
    graph: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut totals = Totals::new();
    let count = read_file(&args.input, &mut totals)?;
    info!(
        "{count} transactions: {} revenue and {} expense categories",
        totals.revenues.len(),
        totals.expenses.len()
    );
    let totals = totals.reconcile();

    let report = Report::new(&totals);
    write_report(std::io::stdout().lock(), &report)?;

    if let Some(path) = args.graph {
        let graph = FlowGraph::new(&totals, report.savings)?;
        let colors = colorize(&graph, &mut Palette::default());
        write_sankey(std::fs::File::create(&path)?, &graph, &colors)?;
        info!("flow graph written to {}", path.display());
    }
    Ok(())
}
