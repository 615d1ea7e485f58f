//! Inspect node-template catalogs the way the sidebar shows them.
//!
//! Usage:
//!   nodeshelf filter --catalog catalogs/sample_catalog.json --search chat
//!   nodeshelf view --catalog catalogs/sample_catalog.json --edge "models=OpenAIModel"
//!   nodeshelf validate < catalog.json
//!   nodeshelf drag --catalog catalogs/sample_catalog.json --category inputs --item ChatInput

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nodeshelf::{
    Catalog, CatalogSchema, DragPayload, EdgeConstraint, Sidebar, SidebarConfig,
    compute_visible_catalog, load_catalog_from_path, parse_catalog, parse_edge_constraints,
};
use serde_json::Value;
use std::fs;
use std::io::{Read, stdin};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nodeshelf")]
#[command(about = "Search, edge-filter and lay out node-template catalogs")]
struct Cli {
    /// Log level used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    /// Sidebar config file; falls back to NODESHELF_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the visible catalog as JSON.
    Filter(FilterArgs),
    /// Print the sidebar sections for a search or an edge filter.
    View(ViewArgs),
    /// List item keys whose descriptor carries an error.
    Errors(CatalogArgs),
    /// Validate a catalog against the bundled (or given) JSON Schema.
    Validate(ValidateArgs),
    /// Print the drag payload for one item.
    Drag(DragArgs),
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Catalog JSON file; reads stdin when omitted or `-`.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EdgeArgs {
    /// Edge constraint as FAMILY=TYPE1,TYPE2 (repeatable).
    #[arg(long = "edge", value_name = "FAMILY=TYPES")]
    edges: Vec<EdgeConstraint>,
    /// File with edge constraints (JSON array, object, or one object per line).
    #[arg(long)]
    edges_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
    /// Search text; empty disables text filtering.
    #[arg(long, default_value = "")]
    search: String,
    #[command(flatten)]
    edges: EdgeArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Args, Debug)]
struct ViewArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
    /// Search text. Mutually exclusive with edge constraints.
    #[arg(long, conflicts_with_all = ["edges", "edges_file"])]
    search: Option<String>,
    #[command(flatten)]
    edges: EdgeArgs,
    /// Render the panel collapsed.
    #[arg(long)]
    collapsed: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
    /// Schema file to use instead of the bundled catalog schema.
    #[arg(long)]
    schema: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DragArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
    #[arg(long)]
    category: String,
    #[arg(long)]
    item: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Filter(args) => run_filter(args),
        Command::View(args) => {
            let config = SidebarConfig::resolve(cli.config.as_deref())?;
            run_view(args, config)
        }
        Command::Errors(args) => run_errors(args),
        Command::Validate(args) => run_validate(args),
        Command::Drag(args) => run_drag(args),
    }
}

fn run_filter(args: FilterArgs) -> Result<()> {
    let catalog = read_catalog(&args.catalog)?;
    let constraints = collect_edges(args.edges)?;
    let visible = compute_visible_catalog(&catalog, &args.search, &constraints);
    println!("{}", serde_json::to_string_pretty(&visible)?);
    Ok(())
}

fn run_view(args: ViewArgs, config: SidebarConfig) -> Result<()> {
    let catalog = read_catalog(&args.catalog)?;
    let constraints = collect_edges(args.edges)?;
    let mut sidebar = Sidebar::new(catalog, config);
    sidebar.set_edge_filter(constraints);
    if let Some(search) = args.search {
        sidebar.set_search(search);
    }
    if args.collapsed {
        sidebar.toggle_expanded();
    }
    let view = sidebar.view();
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => print!("{view}"),
    }
    Ok(())
}

fn run_errors(args: CatalogArgs) -> Result<()> {
    let catalog = read_catalog(&args)?;
    for key in catalog.errored_items() {
        println!("{key}");
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<()> {
    let raw = read_input(args.catalog.catalog.as_deref())?;
    let value: Value = serde_json::from_str(&raw).context("parsing input JSON")?;
    let schema = match &args.schema {
        Some(path) => CatalogSchema::load(path)?,
        None => CatalogSchema::bundled()?,
    };
    schema.validate(&value)?;
    let catalog: Catalog =
        serde_json::from_value(value).context("catalog matches schema but not the item model")?;
    info!(
        categories = catalog.category_keys().count(),
        items = catalog.item_count(),
        "catalog is valid"
    );
    Ok(())
}

fn run_drag(args: DragArgs) -> Result<()> {
    let catalog = read_catalog(&args.catalog)?;
    let Some(item) = catalog.item(&args.category, &args.item) else {
        bail!(
            "no item '{}' in category '{}'",
            args.item,
            args.category
        );
    };
    println!("{}", DragPayload::for_item(&args.item, item).to_transfer_data()?);
    Ok(())
}

fn collect_edges(args: EdgeArgs) -> Result<Vec<EdgeConstraint>> {
    let mut constraints = match &args.edges_file {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("reading edge constraints {}", path.display()))?;
            parse_edge_constraints(&data)
                .with_context(|| format!("parsing edge constraints {}", path.display()))?
        }
        None => Vec::new(),
    };
    constraints.extend(args.edges);
    Ok(constraints)
}

fn read_catalog(args: &CatalogArgs) -> Result<Catalog> {
    match stdin_or_path(args.catalog.as_deref()) {
        Some(path) => load_catalog_from_path(path),
        None => parse_catalog(&read_input(None)?),
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match stdin_or_path(file) {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display())),
        None => {
            let mut buf = String::new();
            stdin()
                .read_to_string(&mut buf)
                .context("reading stdin for input JSON")?;
            Ok(buf)
        }
    }
}

fn stdin_or_path(file: Option<&Path>) -> Option<&Path> {
    file.filter(|path| path.as_os_str() != "-")
}
