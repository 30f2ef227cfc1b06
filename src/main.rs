use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scenario_index::index::build::build_index_from_path;
use scenario_index::index::stats::show_stats;
use scenario_index::index::SourceIndex;
use scenario_index::logging::{init_logging, LogConfig};
use scenario_index::output::{self, Listing, NodeLocation, Target};
use scenario_index::query::QueryExecutor;
use scenario_index::stream::Framing;
use scenario_index::utils::{get_config_path, AppConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sxi")]
#[command(about = "Map scenario source lines to compiled test cases")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct InputArgs {
    /// Message stream to index ('-' reads stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Stream framing: ndjson or length-prefixed
    #[arg(long)]
    framing: Option<Framing>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show index statistics
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the source location of a node
    Locate {
        /// Node id
        node_id: String,

        #[command(flatten)]
        input: InputArgs,
    },
    /// List compiled cases by document, line or node
    Cases {
        /// Document uri
        #[arg(long, conflicts_with = "node", required_unless_present = "node")]
        uri: Option<String>,

        /// Source line within the document
        #[arg(long, requires = "uri")]
        line: Option<u32>,

        /// Source node id
        #[arg(long)]
        node: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },
    /// List compiled case steps by line or node
    Steps {
        /// Document uri
        #[arg(long, conflicts_with = "node", required_unless_present = "node", requires = "line")]
        uri: Option<String>,

        /// Source line within the document
        #[arg(long, requires = "uri")]
        line: Option<u32>,

        /// Source node id
        #[arg(long)]
        node: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration to the config file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) if path.exists() => AppConfig::load_from(path)?,
        // `config` subcommands may target a file that does not exist yet
        Some(_) if matches!(cli.command, Commands::Config { .. }) => AppConfig::default(),
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let log_config = LogConfig::resolve(
        cli.verbose,
        std::env::var("RUST_LOG").ok(),
        config.log_level.as_deref(),
        config.log_format,
    );
    init_logging(&log_config)?;

    match cli.command {
        Commands::Stats { input } => {
            let index = load_index(&input, &config)?;
            if input.json {
                output::print_json(&mut std::io::stdout(), &index.stats())?;
            } else {
                show_stats(&index);
            }
        }
        Commands::Locate { node_id, input } => {
            let index = load_index(&input, &config)?;
            let location = QueryExecutor::new(&index).location(&node_id)?;
            if input.json {
                let found = NodeLocation {
                    node_id: &node_id,
                    line: location.line,
                    column: location.column,
                };
                output::print_json(&mut std::io::stdout(), &found)?;
            } else {
                output::print_location(&mut output::stdout(!input.no_color), &node_id, location)?;
            }
        }
        Commands::Cases {
            uri,
            line,
            node,
            input,
        } => {
            let index = load_index(&input, &config)?;
            let query = QueryExecutor::new(&index);
            let (target, ids) = match (&uri, line, &node) {
                (Some(uri), Some(line), _) => (
                    Target::Line { uri, line },
                    query.artifact_ids_at_line(uri, line),
                ),
                (Some(uri), None, _) => (Target::Document { uri }, query.artifact_ids(uri)),
                (None, _, Some(node_id)) => (
                    Target::Node { node_id },
                    query.artifact_ids_from_node(node_id),
                ),
                (None, _, None) => anyhow::bail!("Either --uri or --node is required"),
            };
            print_listing(&input, target, ids)?;
        }
        Commands::Steps {
            uri,
            line,
            node,
            input,
        } => {
            let index = load_index(&input, &config)?;
            let query = QueryExecutor::new(&index);
            let (target, ids) = match (&uri, line, &node) {
                (Some(uri), Some(line), _) => (
                    Target::Line { uri, line },
                    query.artifact_step_ids_at_line(uri, line),
                ),
                (None, _, Some(node_id)) => (
                    Target::Node { node_id },
                    query.artifact_step_ids_from_node(node_id),
                ),
                _ => anyhow::bail!("Either --uri with --line, or --node is required"),
            };
            print_listing(&input, target, ids)?;
        }
        Commands::Config { action } => handle_config_command(action, &cli.config, &config)?,
    }

    Ok(())
}

fn load_index(input: &InputArgs, config: &AppConfig) -> Result<SourceIndex> {
    let mut index_config = config.index_config();
    if let Some(framing) = input.framing {
        index_config.framing = framing;
    }
    build_index_from_path(&input.input, &index_config)
}

fn print_listing(input: &InputArgs, target: Target<'_>, ids: &[String]) -> Result<()> {
    if input.json {
        output::print_json(&mut std::io::stdout(), &Listing { target, ids })?;
    } else {
        output::print_ids(&mut output::stdout(!input.no_color), target, ids)?;
    }
    Ok(())
}

fn handle_config_command(
    action: ConfigAction,
    explicit: &Option<PathBuf>,
    config: &AppConfig,
) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = explicit
                .clone()
                .or_else(get_config_path)
                .context("Could not determine config directory")?;
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            output::print_json(&mut std::io::stdout(), config)?;
        }
        ConfigAction::Init => {
            let path = match explicit {
                Some(path) => {
                    AppConfig::default().save_to(path)?;
                    path.clone()
                }
                None => AppConfig::default().save()?,
            };
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
