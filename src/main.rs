//! Command-line entry point: read a mechanism report, write a Graphviz
//! description of its species-reaction graph

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process;

use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use dsrgraph::io::dot::{write_dot, SKELETON};
use dsrgraph::io::mech_parse::ReportParser;
use dsrgraph::reaction_network::graph::ReactionGraph;

fn main() {
    let _ = TermLogger::init(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: dsrgraph <report-file> <output-dot-file> [seed-species]");
        process::exit(2);
    }
    if let Err(err) = run(&args[1], &args[2], args.get(3).map(|s| s.as_str())) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(input: &str, output: &str, seed: Option<&str>) -> Result<(), Box<dyn Error>> {
    let mut graph = ReactionGraph::new_empty();
    let reader = BufReader::new(File::open(input)?);
    ReportParser::new().parse(reader, &mut graph)?;

    let subgraph = match seed {
        Some(name) => graph.neighborhood(name),
        None => graph.skeleton(),
    };
    write_dot(output, &subgraph, SKELETON)?;
    Ok(())
}
