use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage e-commerce product categories",
    long_about = "Category admin backed by a local snapshot store. Without a subcommand it serves the REST API; subcommands run one-shot category and session operations.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "REVISIT_DATA_DIR",
        default_value = ".revisit/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Keep state in memory only; nothing is written to the data dir"
    )]
    pub ephemeral: bool,

    #[arg(
        long = "latency-ms",
        env = "REVISIT_LATENCY_MS",
        default_value_t = 1000u64,
        value_name = "MS",
        help = "Simulated latency applied to every store mutation"
    )]
    pub latency_ms: u64,

    #[arg(
        long = "log-file",
        env = "REVISIT_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "REVISIT_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8084",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    if dotenvy::from_filename(&dotenv_path).is_ok() {
        log::debug!("Loaded env from {}", dotenv_path);
    }
    Cli::parse()
}
