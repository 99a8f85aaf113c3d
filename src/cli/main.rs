#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use csv::Writer;
use dinic::{Dinic, Edge, EdgeFlow, MaxFlow, PushRelabel, ResidualGraph};
use itertools::Itertools;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

type Graph = ResidualGraph<String, i64>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algo {
    Dinic,
    PushRelabel,
}

/// Compute the maximum flow of a capacitated directed graph.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// CSV file with a `from,to,capacity` header
    #[arg(required_unless_present = "demo")]
    input: Option<PathBuf>,

    /// Source node
    #[arg(short, long, required_unless_present = "demo")]
    source: Option<String>,

    /// Sink node
    #[arg(short = 't', long, required_unless_present = "demo")]
    sink: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Algo::Dinic)]
    algo: Algo,

    /// Write `from,to,capacity,flow` rows for every edge carrying flow
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verify capacity bounds and flow conservation after the run
    #[arg(long)]
    check: bool,

    /// Run on the built-in four node example instead of reading a file
    #[arg(long, conflicts_with = "input")]
    demo: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// Function to read the edges from CSV file
fn read_edges_csv(filepath: &Path) -> Result<Graph, Box<dyn Error>> {
    let file = File::open(filepath)?;
    let mut rdr = csv::Reader::from_reader(file);
    let edges = rdr
        .deserialize::<Edge<String, i64>>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ResidualGraph::from_edges(edges).map_err(|e| e.to_string())?)
}

// Function to write the flow results
fn write_csv(flows: &[EdgeFlow<String, i64>], filepath: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filepath)?;
    for flow in flows {
        wtr.serialize(flow)?;
    }
    wtr.flush()?;
    Ok(())
}

fn demo_graph() -> Result<Graph, Box<dyn Error>> {
    let mut graph = Graph::new();
    for (u, v, capacity) in [("A", "B", 10), ("A", "C", 5), ("B", "D", 15), ("C", "D", 10)] {
        graph
            .add_edge(u.to_string(), v.to_string(), capacity)
            .map_err(|e| e.to_string())?;
    }
    Ok(graph)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    let log_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let (mut graph, source, sink) = match (&args.input, args.demo) {
        (Some(input), false) => (
            read_edges_csv(input)?,
            args.source.clone().unwrap_or_default(),
            args.sink.clone().unwrap_or_default(),
        ),
        _ => (
            demo_graph()?,
            args.source.clone().unwrap_or_else(|| "A".to_string()),
            args.sink.clone().unwrap_or_else(|| "D".to_string()),
        ),
    };
    log::info!(
        "loaded {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let value = match args.algo {
        Algo::Dinic => Dinic::new().max_flow(&mut graph, &source, &sink),
        Algo::PushRelabel => PushRelabel::new().max_flow(&mut graph, &source, &sink),
    }
    .map_err(|e| e.to_string())?;

    if args.check {
        graph.check(&source, &sink).map_err(|e| e.to_string())?;
    }

    let flows = graph
        .flows()
        .sorted_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)))
        .collect::<Vec<_>>();
    for f in &flows {
        log::debug!("{} -> {}: {}/{}", f.from, f.to, f.flow, f.capacity);
    }
    if let Some(output) = &args.output {
        write_csv(&flows, output)?;
    }

    println!("{value}");
    Ok(())
}
