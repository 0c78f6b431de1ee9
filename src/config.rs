use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "pocket_ledger")]
#[command(about = "Replays a CSV batch of ledger calls and prints the replies as CSV")]
pub struct Cli {
    /// CSV file with headers `call,account,arg,note`
    #[arg(value_name = "CALLS")]
    pub input: PathBuf,

    /// Snapshot loaded before the batch and saved after it
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}
