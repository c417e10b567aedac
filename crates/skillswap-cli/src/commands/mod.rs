use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::{Path, PathBuf};

use skillswap_config::{ConfigLoader, SwapConfig};
use skillswap_store::UserStore;

mod run;
mod setup;
mod users;

/// 🤝 SkillSwap — peer matching and skill suggestions for a skill-exchange platform
#[derive(Parser)]
#[command(name = "skillswap", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to skillswap.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute recommendations for every user and write them back
    Run {
        /// Compute and print recommendations without storing them
        #[arg(long)]
        dry_run: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import users from a JSON file (array of user records)
    Seed {
        /// Seed file to import
        #[arg(required_unless_present = "demo")]
        file: Option<PathBuf>,
        /// Replace the built-in demo users instead of reading a file
        #[arg(long, conflicts_with = "file")]
        demo: bool,
    },
    /// List users and their declared skills
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a user's stored matches and suggested skills
    Show {
        /// User id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Initialize a new skillswap.toml in the current or home directory
    Init {
        /// Create in current directory instead of ~/.skillswap/
        #[arg(long)]
        local: bool,
    },
    /// Show version and build info
    Version,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub async fn run(self) -> skillswap_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(&config.logging.level)
        };
        init_tracing(&config.logging.format, log_level);

        match self.command {
            Commands::Run { dry_run, json } => run::cmd_run(&config, dry_run, json, self.quiet).await,
            Commands::Seed { file, demo } => users::cmd_seed(&config, file.as_deref(), demo),
            Commands::Users { json } => users::cmd_users(&config, json),
            Commands::Show { id, json } => users::cmd_show(&config, &id, json),
            Commands::Config { json } => Self::cmd_config(&config, config_loader.path(), json),
            Commands::Init { local } => setup::cmd_init(local),
            Commands::Version => Self::cmd_version(),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    fn cmd_config(config: &SwapConfig, path: &Path, json: bool) -> skillswap_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(config)?);
        } else {
            println!("# {}", path.display());
            println!(
                "{}",
                toml::to_string_pretty(config)
                    .map_err(|e| skillswap_core::SwapError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_version() -> skillswap_core::Result<()> {
        println!("🤝 SkillSwap v{}", env!("CARGO_PKG_VERSION"));
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> skillswap_core::Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "skillswap", &mut std::io::stdout());
        Ok(())
    }
}

fn init_tracing(format: &str, log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A subscriber may already be installed when the CLI runs in-process.
    let _ = match format {
        "json" => builder.json().with_target(true).try_init(),
        "compact" => builder.compact().with_target(false).try_init(),
        _ => builder.with_target(false).try_init(),
    };
}

/// Open the configured user store, creating the parent directory if needed.
fn open_store(config: &SwapConfig) -> skillswap_core::Result<UserStore> {
    let path = &config.store.db_path;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    UserStore::open(path)
}

/// Join a list for display, or a dash when empty.
fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}
