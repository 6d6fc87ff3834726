use anyhow::Result;
use clap::{Parser, Subcommand};
use lin::integrations::linear::LinearClient;
use lin::{config, integrations, table, tui};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lin")]
#[command(about = "Browse and pick the Linear issues assigned to you")]
#[command(version)]
struct Args {
    /// Initialize configuration
    #[arg(long)]
    init: bool,

    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Log GraphQL requests and responses
    #[arg(long)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Interactive list: move with j/k, select with enter/space (default)
    Pick,
    /// Print assigned issues as a table
    Table,
}

/// `RUST_LOG` when set, else `default_directive`.
fn env_filter(rust_log: Option<&str>, default_directive: &str) -> EnvFilter {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(default_directive),
    }
}

fn init_logging(args: &Args, interactive: bool) -> Result<()> {
    // Keep routine logs off the alternate screen unless they go to a file
    let default_directive = if interactive && args.log_file.is_none() {
        "lin=warn"
    } else {
        "lin=info"
    };

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let mut filter = env_filter(rust_log.as_deref(), default_directive);
    if args.debug {
        filter = filter.add_directive("lin=debug".parse()?);
    }

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Pick);

    init_logging(&args, command == Command::Pick && !args.init)?;

    if args.init {
        config::init_wizard(args.config.as_deref()).await?;
        return Ok(());
    }

    let config = config::load(args.config.as_deref())?;
    let client = LinearClient::from_config(&config).with_debug(args.debug);

    match command {
        Command::Table => {
            let issues = integrations::fetch_my_issues(&client).await?;
            println!("{}", table::render_table(&issues));
        }
        Command::Pick => {
            let outcome = tui::run(Arc::new(client)).await?;
            if let Some(reason) = &outcome.fetch_error {
                tracing::error!("Failed to fetch issues: {}", reason);
            }
            for issue in &outcome.selected {
                println!(
                    "{}\t{}\t{}",
                    issue.identifier,
                    issue.title,
                    issue.url.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}
