use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Personal task tracker with a terminal UI.
/// Tasks live in <data-dir>/tasks.json; the data directory defaults to
/// $TM_DATA_DIR, then ~/.tm.
#[derive(Parser)]
#[command(name = "tm", version, about = "Personal task tracker")]
pub struct Cli {
    /// Directory holding tasks.json and the UI log.
    #[arg(long, global = true, env = "TM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
