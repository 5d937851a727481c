use nautilus_core::{
    ContainerKey, Edge, LayoutConfig, LayoutOptions, Node, ParentIndex, build_hierarchy,
    node_map, project_edges,
};
use nautilus_layout::{CancelToken, LayoutInput, LayoutOutcome, Orchestrator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Core(nautilus_core::Error),
    Layout(nautilus_layout::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<nautilus_core::Error> for CliError {
    fn from(value: nautilus_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<nautilus_layout::Error> for CliError {
    fn from(value: nautilus_layout::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Select,
    Hierarchy,
    Project,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    direction: Option<String>,
    engine: Option<String>,
    config: Option<String>,
    select: Option<Vec<String>>,
}

/// The JSON document read from the input.
#[derive(Debug, Default, Deserialize)]
struct InputDoc {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    selected: Option<Vec<String>>,
    #[serde(default)]
    config: Option<Value>,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    containers: &'a [ContainerKey],
}

#[derive(Serialize)]
struct HierarchyEntryOut<'a> {
    id: &'a str,
    depth: usize,
    parent: Option<&'a str>,
    children: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectedOut<'a> {
    id: &'a str,
    source: &'a str,
    target: &'a str,
    original_id: &'a str,
    original_source: &'a str,
    original_target: &'a str,
}

fn usage() -> &'static str {
    "nautilus-cli\n\
\n\
USAGE:\n\
  nautilus-cli [layout] [--pretty] [--direction TB|BT|LR|RL] [--engine <name>] [--config <json-path>] [<path>|-]\n\
  nautilus-cli select [--select <id,id,...>] [--pretty] [--direction TB|BT|LR|RL] [--engine <name>] [--config <json-path>] [<path>|-]\n\
  nautilus-cli hierarchy [--pretty] [<path>|-]\n\
  nautilus-cli project [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON document: { \"nodes\": [...], \"edges\": [...], \"selected\"?: [...], \"config\"?: {...} }.\n\
  - Config layers merge in order: defaults, the document's config, --config, then flags.\n\
  - select uses --select when given, otherwise the document's \"selected\" list.\n\
  - Set NAUTILUS_LOG (e.g. NAUTILUS_LOG=debug) to enable diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "select" => args.command = Command::Select,
            "hierarchy" => args.command = Command::Hierarchy,
            "project" => args.command = Command::Project,
            "--pretty" => args.pretty = true,
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.direction = Some(dir.clone());
            }
            "--engine" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.engine = Some(name.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--select" => {
                let Some(ids) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.select = Some(
                    ids.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn effective_config(args: &Args, doc: &InputDoc) -> Result<LayoutConfig, CliError> {
    let mut config = LayoutConfig::defaults();
    if let Some(doc_config) = doc.config.as_ref() {
        config.deep_merge(doc_config);
    }
    if let Some(path) = args.config.as_deref() {
        let text = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        config.deep_merge(&value);
    }
    if let Some(direction) = args.direction.as_deref() {
        config.set_value("direction", Value::String(direction.to_string()));
    }
    if let Some(engine) = args.engine.as_deref() {
        config.set_value("engine", Value::String(engine.to_string()));
    }
    Ok(config)
}

fn write_layout(outcome: &LayoutOutcome, pretty: bool) -> Result<(), CliError> {
    let containers: &[ContainerKey] = match outcome {
        LayoutOutcome::Applied { containers, .. } => containers,
        LayoutOutcome::Cancelled { .. } => &[],
    };
    write_json(
        &LayoutOut {
            nodes: outcome.nodes(),
            edges: outcome.edges(),
            containers,
        },
        pretty,
    )
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc: InputDoc = serde_json::from_str(&text)?;

    match args.command {
        Command::Layout | Command::Select => {
            let options = LayoutOptions::from_config(&effective_config(&args, &doc)?)?;
            let orchestrator = Orchestrator::with_default_engines();
            let input = LayoutInput::new(doc.nodes, doc.edges).with_options(options);
            let token = CancelToken::new();

            let outcome = if matches!(args.command, Command::Select) {
                let selected = args.select.or(doc.selected).unwrap_or_default();
                orchestrator.layout_selection_sync(&input, &selected, &token)?
            } else {
                orchestrator.layout_all_sync(&input, &token)?
            };
            write_layout(&outcome, args.pretty)
        }
        Command::Hierarchy => {
            let nodes = node_map(&doc.nodes);
            let index = ParentIndex::build(&nodes);
            let tree = build_hierarchy(&index, &nodes)?;
            let entries: Vec<HierarchyEntryOut<'_>> = tree
                .iter()
                .map(|n| HierarchyEntryOut {
                    id: &n.id,
                    depth: n.depth,
                    parent: n
                        .parent
                        .and_then(|p| tree.get(p))
                        .map(|p| p.id.as_str()),
                    children: tree.children(n).map(|c| c.id.as_str()).collect(),
                })
                .collect();
            write_json(&entries, args.pretty)
        }
        Command::Project => {
            let nodes = node_map(&doc.nodes);
            let projection = project_edges(&doc.edges, &nodes);
            let buckets: serde_json::Map<String, Value> = projection
                .buckets()
                .map(|(key, edges)| {
                    let edges: Vec<ProjectedOut<'_>> = edges
                        .iter()
                        .map(|p| ProjectedOut {
                            id: &p.edge.id,
                            source: &p.edge.source,
                            target: &p.edge.target,
                            original_id: &p.original_id,
                            original_source: &p.original_source,
                            original_target: &p.original_target,
                        })
                        .collect();
                    serde_json::to_value(edges).map(|v| (key.as_wire().to_string(), v))
                })
                .collect::<Result<_, _>>()?;
            write_json(&buckets, args.pretty)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NAUTILUS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
