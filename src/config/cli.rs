use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "secret-santa")]
#[command(about = "Draw Secret Santa pairs and text everyone their recipient")]
pub struct CliArgs {
    /// Path to the TOML (or .json) configuration file
    #[arg(short, long, default_value = "santa.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Log the messages instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Override max_attempts from the config file
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Seed the draw for a reproducible assignment
    #[arg(long)]
    pub seed: Option<u64>,
}
