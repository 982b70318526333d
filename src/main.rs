use anyhow::Context;
use clap::{Parser, Subcommand};
use pyrepl_tools::freshness;
use pyrepl_tools::interpreter::InterpreterConfig;
use pyrepl_tools::normalizer::{self, SelectionRequest};
use pyrepl_tools::rpc;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pyrepl-tools",
    about = "Editor-side helpers for running Python selections in a REPL",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a selection: JSON request on stdin, JSON reply on stdout
    Normalize,
    /// Serve framed execute/interrupt requests over stdin/stdout
    Serve {
        /// Interpreter command line, e.g. "python3" or "py -3"
        #[arg(long, default_value = "python3")]
        interpreter: String,
    },
    /// Report pinned requirements that lag behind the package index
    Outdated {
        /// Pinned requirements file
        #[arg(long, default_value = "requirements.txt")]
        requirements: PathBuf,
        /// Package index base URL
        #[arg(long, default_value = "https://pypi.org")]
        index_url: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Normalize => run_normalize(),
        Command::Serve { interpreter } => {
            let config = InterpreterConfig::from_command_line(&interpreter)?;
            rpc::run_server(config)?;
            Ok(())
        }
        Command::Outdated {
            requirements,
            index_url,
        } => run_outdated(&requirements, &index_url),
    }
}

fn run_normalize() -> anyhow::Result<()> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("reading request from stdin")?;
    let request: SelectionRequest = serde_json::from_str(&raw).context("decoding request")?;

    let reply = normalizer::handle_request(&request)?;
    serde_json::to_writer(std::io::stdout(), &reply)?;
    Ok(())
}

fn run_outdated(requirements: &Path, index_url: &str) -> anyhow::Result<()> {
    let pins = freshness::load_requirements(requirements)
        .with_context(|| format!("reading {}", requirements.display()))?;
    if pins.is_empty() {
        println!("no pinned packages found in {}", requirements.display());
        return Ok(());
    }

    let client = freshness::IndexClient::new(index_url)?;
    let latest = freshness::fetch_latest(&client, &pins);
    let outdated = freshness::diff_versions(&pins, &latest);

    if outdated.is_empty() {
        println!("all {} pinned packages are up to date", pins.len());
        return Ok(());
    }

    println!(
        "{} of {} pinned packages are behind the index:",
        outdated.len(),
        pins.len()
    );
    for package in &outdated {
        println!("  {} {} -> {}", package.name, package.pinned, package.latest);
    }
    std::process::exit(1);
}
