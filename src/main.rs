use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pipeline_topology::export::link_table::write_link_table_file;
use pipeline_topology::generate_topology;
use pipeline_topology::loader::parser::write_json_file;
use pipeline_topology::logger::{self, DEFAULT_LOG_DIR, LoggerConfig};

/// Resolves a pipeline blueprint against its dockerinfo into a linked call graph.
#[derive(Parser, Debug)]
#[command(name = "pipeline-topology", version, about)]
struct Cli {
    /// Blueprint JSON describing nodes, operations and connections
    #[arg(short, long)]
    blueprint: PathBuf,

    /// Dockerinfo JSON describing where each container is deployed
    #[arg(short, long)]
    dockerinfo: PathBuf,

    /// Write the resolved topology as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the link table as `;`-separated CSV
    #[arg(long)]
    links_csv: Option<PathBuf>,

    /// Directory for the log file
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,

    /// Log to the console only
    #[arg(long)]
    no_log_file: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init(&LoggerConfig { log_dir: (!cli.no_log_file).then(|| cli.log_dir.clone()), ..LoggerConfig::default() });

    let topology = generate_topology(&cli.blueprint, &cli.dockerinfo).with_context(|| {
        format!("failed to resolve '{}' against '{}'", cli.blueprint.display(), cli.dockerinfo.display())
    })?;

    topology.print_summary();

    if let Some(path) = &cli.output {
        write_json_file(path, &topology.to_dto()).with_context(|| format!("failed to write topology to '{}'", path.display()))?;
        log::info!("Topology written to '{}'.", path.display());
    }

    if let Some(path) = &cli.links_csv {
        write_link_table_file(&topology, path).with_context(|| format!("failed to write link table to '{}'", path.display()))?;
        log::info!("Link table written to '{}'.", path.display());
    }

    Ok(())
}
