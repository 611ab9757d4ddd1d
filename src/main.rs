use anyhow::{Context, Result};
use clap::Parser;
use hbnb::config::DEFAULT_PROMPT;
use hbnb::storage::DEFAULT_FILE_PATH;
use hbnb::{Console, ConsoleConfig, FileStorage, Storage};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hbnb")]
#[command(about = "Command console for the HBNB object store")]
struct Cli {
    /// JSON file backing the object store
    #[arg(long, env = "HBNB_FILE", default_value = DEFAULT_FILE_PATH)]
    file: PathBuf,

    /// Prompt shown in interactive mode
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Echo the prompt even when stdin is not a terminal
    #[arg(long, conflicts_with = "no_prompt")]
    interactive: bool,

    /// Never echo the prompt
    #[arg(long)]
    no_prompt: bool,

    /// Log filter, e.g. `debug` or `hbnb=info`; logs go to stderr
    #[arg(long, env = "HBNB_LOG", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn config(&self) -> ConsoleConfig {
        let config = ConsoleConfig::new()
            .file_path(&self.file)
            .prompt(&self.prompt);
        if self.interactive {
            config.interactive(true)
        } else if self.no_prompt {
            config.interactive(false)
        } else {
            config
        }
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let config = cli.config();

    let storage = FileStorage::open(&config.file_path)
        .with_context(|| format!("Failed to load '{}'", config.file_path.display()))?;

    let stdin = io::stdin();
    let terminal = stdin.is_terminal();
    let prompt = config.effective_prompt(terminal).map(str::to_owned);

    let mut console = Console::new(storage, io::stdout());
    let session = match prompt {
        Some(prompt) if terminal => console.run_editor(&prompt),
        Some(prompt) => {
            console = console.with_prompt(prompt);
            console.run(stdin.lock())
        }
        None => console.run(stdin.lock()),
    };
    session.context("Console session failed")?;

    let (storage, _) = console.into_parts();
    storage
        .save()
        .with_context(|| format!("Failed to save '{}'", config.file_path.display()))?;
    info!("Session closed");
    Ok(())
}
