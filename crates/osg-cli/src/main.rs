use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use osg_core::cache::GraphCache;
use osg_core::config::{self, CONFIG_FILE_NAME, OsgConfig, OutputFormat};
use osg_core::graph::SchemaGraph;
use osg_core::parse::{self, document::ParsedDocument};
use osg_core::resolve;
use osg_core::upload::{self, FormField};

#[derive(Parser)]
#[command(name = "osg", about = "OpenAPI schema graph resolver", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an OpenAPI document into a schema graph
    Resolve {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format (overrides the config file)
        #[arg(long)]
        format: Option<GraphFormat>,

        /// Write the graph to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize the graph of an OpenAPI document
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Run a file through the upload handler and print its JSON response
    Upload {
        /// File to submit; omit to submit an empty form
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show or clear the cached graph
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Initialize a new osg configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Print the cached graph
    Show,
    /// Remove the cached graph
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum GraphFormat {
    Json,
    Yaml,
}

impl From<GraphFormat> for OutputFormat {
    fn from(format: GraphFormat) -> Self {
        match format {
            GraphFormat::Json => OutputFormat::Json,
            GraphFormat::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            input,
            format,
            output,
        } => cmd_resolve(input, format, output),

        Commands::Inspect { input } => cmd_inspect(input),

        Commands::Upload { input } => cmd_upload(input),

        Commands::Cache { action } => cmd_cache(action),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "osg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OsgConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

fn load_document(path: &Path) -> Result<ParsedDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(parsed)
}

fn render_graph(graph: &SchemaGraph, format: OutputFormat, pretty: bool) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(graph)?,
        OutputFormat::Json => serde_json::to_string(graph)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(graph)?,
    };
    Ok(rendered)
}

fn cmd_resolve(
    input: Option<PathBuf>,
    format: Option<GraphFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let format = format.map(OutputFormat::from).unwrap_or(cfg.output.format);
    let output = output.or_else(|| cfg.output.path.as_ref().map(PathBuf::from));

    let document = load_document(&input)?;
    let graph = resolve(&document);
    let rendered = render_graph(&graph, format, cfg.output.pretty)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(&path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Resolved {} nodes and {} edges → {}",
                graph.nodes.len(),
                graph.edges.len(),
                path.display()
            );
        }
        None => println!("{}", rendered.trim_end()),
    }

    if cfg.cache.enabled {
        let cache = GraphCache::new(&cfg.cache.dir);
        cache.store(Some(&graph))?;
        log::info!("cached graph in {}", cache.entry_path().display());
    }
    Ok(())
}

fn cmd_inspect(input: PathBuf) -> Result<()> {
    let document = load_document(&input)?;
    let schema_count = document.schemas().map_or(0, |s| s.len());
    let graph = resolve(&document);

    let mut node_kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for node in &graph.nodes {
        *node_kinds.entry(node.kind.as_str()).or_default() += 1;
    }
    let mut edge_kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for edge in &graph.edges {
        *edge_kinds.entry(edge.kind.as_str()).or_default() += 1;
    }

    eprintln!("{}", input.display());
    eprintln!("  Schemas: {}", schema_count);
    eprintln!("  Nodes: {}", graph.nodes.len());
    for (kind, count) in &node_kinds {
        eprintln!("    {}: {}", kind, count);
    }
    eprintln!("  Edges: {}", graph.edges.len());
    for (kind, count) in &edge_kinds {
        eprintln!("    {}: {}", kind, count);
    }

    let externals: Vec<_> = graph.external_nodes().collect();
    if !externals.is_empty() {
        eprintln!("  External references:");
        for node in externals {
            eprintln!("    {}", node.id);
        }
    }
    Ok(())
}

fn cmd_upload(input: Option<PathBuf>) -> Result<()> {
    let field = match input {
        Some(path) => {
            let bytes =
                fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !upload::has_accepted_extension(&name) {
                log::warn!(
                    "{} does not have a {} extension, submitting anyway",
                    name,
                    upload::ACCEPTED_EXTENSIONS.join("/")
                );
            }
            Some(FormField::File { name, bytes })
        }
        None => None,
    };

    let response = upload::handle_upload(field);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn cmd_cache(action: CacheAction) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let cache = GraphCache::new(&cfg.cache.dir);

    match action {
        CacheAction::Show => match cache.load() {
            Some(graph) => {
                let rendered = render_graph(&graph, cfg.output.format, cfg.output.pretty)?;
                println!("{}", rendered.trim_end());
            }
            None => eprintln!("No cached graph in {}", cache.dir().display()),
        },
        CacheAction::Clear => {
            cache.clear()?;
            eprintln!("Cleared {}", cache.entry_path().display());
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
