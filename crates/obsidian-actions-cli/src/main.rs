mod cmd;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use cmd::{
    command::CommandSubcommand, config::ConfigSubcommand, dataview::DataviewSubcommand,
    file::FileSubcommand, folder::FolderSubcommand, note::NoteSubcommand,
};
use settings::{Overrides, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "obsidian-actions",
    about = "Drive Obsidian through the Actions URI plugin",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ~/.obsidian-actions/config.yaml)
    #[arg(long, global = true, env = "OBSIDIAN_ACTIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Vault to act on
    #[arg(long, global = true, env = "OBSIDIAN_VAULT")]
    vault: Option<String>,

    /// Path to the xcall binary
    #[arg(long, global = true, env = "OBSIDIAN_XCALL", conflicts_with = "bridge")]
    xcall: Option<PathBuf>,

    /// Send actions to an HTTP bridge at this base URL instead of xcall
    #[arg(long, global = true)]
    bridge: Option<String>,

    /// Give up after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run any Actions URI route, e.g. `call note/get -p file=todo`
    Call {
        /// Route such as `note/get` or `command/list`
        route: String,
        /// Parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = cmd::call::parse_param)]
        params: Vec<(String, String)>,
        /// Don't add vault=<name> automatically
        #[arg(long)]
        no_vault: bool,
    },

    /// Print the URI for a route without sending it
    Url {
        route: String,
        #[arg(short = 'p', long = "param", value_parser = cmd::call::parse_param)]
        params: Vec<(String, String)>,
        #[arg(long)]
        no_vault: bool,
    },

    /// Send a full, hand-written URI
    OpenUri { uri: String },

    /// Show plugin and Obsidian version info
    Info,

    /// List all tags in the vault
    Tags,

    /// List and execute command palette commands
    Command {
        #[command(subcommand)]
        subcommand: CommandSubcommand,
    },

    /// Run Dataview queries
    Dataview {
        #[command(subcommand)]
        subcommand: DataviewSubcommand,
    },

    /// Manage files
    File {
        #[command(subcommand)]
        subcommand: FileSubcommand,
    },

    /// Manage folders
    Folder {
        #[command(subcommand)]
        subcommand: FolderSubcommand,
    },

    /// Read and write notes
    Note {
        #[command(subcommand)]
        subcommand: NoteSubcommand,
    },

    /// Inspect and write the config file
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let overrides = Overrides {
        vault: cli.vault,
        xcall: cli.xcall,
        bridge: cli.bridge,
        timeout: cli.timeout,
    };

    let result = Settings::load(cli.config.as_deref(), overrides, cli.json).and_then(|settings| {
        match cli.command {
            Commands::Call {
                route,
                params,
                no_vault,
            } => cmd::call::run_call(&settings, &route, params, no_vault),
            Commands::Url {
                route,
                params,
                no_vault,
            } => cmd::call::run_url(&settings, &route, params, no_vault),
            Commands::OpenUri { uri } => cmd::call::run_uri(&settings, &uri),
            Commands::Info => cmd::vault::info(&settings),
            Commands::Tags => cmd::vault::tags(&settings),
            Commands::Command { subcommand } => cmd::command::run(&settings, subcommand),
            Commands::Dataview { subcommand } => cmd::dataview::run(&settings, subcommand),
            Commands::File { subcommand } => cmd::file::run(&settings, subcommand),
            Commands::Folder { subcommand } => cmd::folder::run(&settings, subcommand),
            Commands::Note { subcommand } => cmd::note::run(&settings, subcommand),
            Commands::Config { subcommand } => cmd::config::run(&settings, subcommand),
        }
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
