mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use bday_core::{BackendKind, BdayConfig};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bday")]
#[command(about = "Keep track of birthdays and the WhatsApp groups that celebrate them")]
struct Cli {
    /// Storage backend (overrides the config file)
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendArg>,

    /// API gateway URL for the remote backend
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log store and API activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Local,
    Remote,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => BackendKind::Local,
            BackendArg::Remote => BackendKind::Remote,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Upcoming birthdays followed by everyone (default)
    Dashboard {
        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,
    },
    /// Birthdays coming up soon
    Upcoming {
        /// How many days ahead to look
        #[arg(short, long)]
        days: Option<i64>,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,
    },
    /// Show one birthday
    Show { id: String },
    /// Add a birthday (prompts for anything left out)
    Add {
        #[arg(short, long)]
        name: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Group id or name
        #[arg(short, long)]
        group: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Change fields of a birthday
    Edit {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Group id or name
        #[arg(short, long)]
        group: Option<String>,

        /// New notes ("" clears them)
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a birthday
    Delete {
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage WhatsApp groups
    Groups {
        #[command(subcommand)]
        command: Option<GroupCommands>,
    },
    /// Write all birthdays and groups as JSON
    Export {
        /// File to write (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace birthdays and/or groups from an exported JSON file
    Import {
        file: PathBuf,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete local data; the demo data comes back on next start
    Clear {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Send a test message to a WhatsApp group through the API gateway
    TestMessage {
        /// Group id or name
        #[arg(short, long)]
        group: String,

        message: Option<String>,
    },
    /// Show config and data paths
    Config,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// List groups (default)
    List,
    /// Add a group
    Add {
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        members: Option<u32>,
    },
    /// Change fields of a group
    Edit {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        /// New description ("" clears it)
        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        members: Option<u32>,
    },
    /// Delete a group nobody's birthday is in
    Delete {
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{}", render::render_error(&err));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("BDAY_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.backend, cli.api_url)?;
    let command = cli.command.unwrap_or(Commands::Dashboard { on: None });

    if let Commands::Config = command {
        return commands::config::run(&config);
    }

    let mut book = commands::open_book(&config)?;

    match command {
        Commands::Dashboard { on } => {
            commands::dashboard::run(&book, &config, on.as_deref()).await
        }
        Commands::Upcoming { days, on } => {
            let days = days.unwrap_or(config.upcoming_days);
            commands::upcoming::run(&book, days, on.as_deref()).await
        }
        Commands::Show { id } => commands::show::run(&book, &id).await,
        Commands::Add {
            name,
            date,
            group,
            notes,
        } => commands::add::run(&mut book, name, date, group, notes).await,
        Commands::Edit {
            id,
            name,
            date,
            group,
            notes,
        } => commands::edit::run(&mut book, &id, name, date, group, notes).await,
        Commands::Delete { id, yes } => commands::delete::run(&mut book, &id, yes).await,
        Commands::Groups { command } => {
            commands::groups::run(&mut book, command.unwrap_or(GroupCommands::List)).await
        }
        Commands::Export { output } => commands::export::run(&book, output.as_deref()).await,
        Commands::Import { file, yes } => commands::import::run(&mut book, &file, yes).await,
        Commands::Clear { yes } => commands::clear::run(&mut book, yes).await,
        Commands::TestMessage { group, message } => {
            commands::test_message::run(&book, &group, message).await
        }
        Commands::Config => commands::config::run(&config),
    }
}

/// Config file + environment, then command-line overrides.
fn load_config(backend: Option<BackendArg>, api_url: Option<String>) -> Result<BdayConfig> {
    let mut config = BdayConfig::load()?;

    if let Some(url) = api_url {
        config.api_url = Some(url);
        config.backend = BackendKind::Remote;
    }
    if let Some(backend) = backend {
        config.backend = backend.into();
    }

    Ok(config)
}
