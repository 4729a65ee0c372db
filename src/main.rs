use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use finance_tracker::cli::{demo, Shell};
use finance_tracker::config::{paths::DIR_ENV_VAR, AppPaths, Settings};
use finance_tracker::logging;
use finance_tracker::services::Session;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker",
    long_about = "Record income and expenses, set spending limits per category \
                  and overall, and print summary reports from the command line."
)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell {
        /// Whose ledger this is
        #[arg(short, long, default_value = "me")]
        owner: String,
    },

    /// Print reports over a seeded sample month
    Demo,

    /// Show the resolved paths and settings
    Config,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let paths = AppPaths::new()?;
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load_or_create(&paths)?,
    };

    match cli.command.unwrap_or(Commands::Shell {
        owner: "me".to_string(),
    }) {
        Commands::Shell { owner } => {
            let session = Session::with_settings(owner, &settings);
            let today = chrono::Local::now().date_naive();
            let stdin = io::stdin();
            let mut shell = Shell::new(session, settings, today).with_prompt(stdin.is_terminal());
            shell.run(stdin.lock(), &mut io::stdout().lock())?;
        }
        Commands::Demo => {
            demo::run(&settings, &mut io::stdout().lock())?;
        }
        Commands::Config => {
            let settings_file = cli.config.unwrap_or_else(|| paths.settings_file());
            println!("Finance tracker configuration");
            println!("=============================");
            println!();
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", settings_file.display());
            println!("Override with:  {}", DIR_ENV_VAR);
            println!();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
