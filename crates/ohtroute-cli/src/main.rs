use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ohtroute_cli::output::{group_nodes, OutputFormat};
use ohtroute_lib::{
    read_layout, Error as LibError, NodeKind, RouteAlgorithm, RouteCalculator, RouteFormat,
    RouteRequest, SearchOptions,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "OHT track layout route planner")]
struct Cli {
    /// Layout document (JSON) to route on.
    #[arg(long, env = "OHTROUTE_LAYOUT")]
    layout: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two node ids.
    Route {
        /// Starting node id.
        #[arg(long = "from")]
        from: String,
        /// Destination node id.
        #[arg(long = "to")]
        to: String,
        /// Step shape: full (with node type and switch option) or simple.
        #[arg(long, default_value_t = RouteFormat::Full)]
        steps: RouteFormat,
        /// Search algorithm: a-star or dijkstra.
        #[arg(long, default_value_t = RouteAlgorithm::AStar)]
        algorithm: RouteAlgorithm,
        /// Abort the search after this many milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// List the layout's node ids grouped by kind.
    Nodes {
        /// Only list nodes of this kind.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Station,
    Switch,
    ViaPoint,
}

impl From<KindArg> for NodeKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Station => NodeKind::Station,
            KindArg::Switch => NodeKind::Switch,
            KindArg::ViaPoint => NodeKind::ViaPoint,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", describe_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let calculator = load_calculator(&cli.layout)?;

    match &cli.command {
        Command::Route {
            from,
            to,
            steps,
            algorithm,
            timeout_ms,
        } => {
            let options = timeout_ms
                .map(|ms| SearchOptions::with_timeout(Duration::from_millis(ms)))
                .unwrap_or_default();
            let request = RouteRequest::new(from.as_str(), to.as_str())
                .with_format(*steps)
                .with_algorithm(*algorithm)
                .with_options(options);
            handle_route(&calculator, &request, cli.format)
        }
        Command::Nodes { kind } => {
            let graph = calculator.graph()?;
            let groups = group_nodes(graph, kind.map(NodeKind::from));
            println!("{}", cli.format.render_nodes(&groups)?);
            Ok(())
        }
    }
}

fn load_calculator(path: &Path) -> Result<RouteCalculator> {
    let layout = read_layout(path)
        .with_context(|| format!("failed to load layout from {}", path.display()))?;
    let mut calculator = RouteCalculator::new();
    let graph = calculator
        .load_layout(&layout)
        .with_context(|| format!("layout {} is not routable", path.display()))?;
    for id in graph.duplicate_node_ids() {
        eprintln!("Warning: node id '{id}' is defined more than once; using the last definition.");
    }
    Ok(calculator)
}

fn handle_route(
    calculator: &RouteCalculator,
    request: &RouteRequest,
    format: OutputFormat,
) -> Result<()> {
    debug!(start = %request.start, goal = %request.goal, "computing route");
    let plan = calculator.compute_route_with(request)?;
    println!("{}", format.render_route(&plan)?);
    Ok(())
}

/// Turn known library errors into short user-facing messages.
fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<LibError>() {
        Some(LibError::NodeNotFound { id }) => {
            format!("Error: Unknown node '{id}'. Use the `nodes` command to list valid ids.")
        }
        Some(LibError::NoRouteFound { start, end }) => {
            format!("Error: No route found between {start} and {end}.")
        }
        Some(LibError::SearchTimedOut { start, end }) => format!(
            "Error: Route search from {start} to {end} timed out. Try a larger --timeout-ms."
        ),
        _ => format!("Error: {err:#}"),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
