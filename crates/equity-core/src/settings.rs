use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Compute contributor ownership from the monthly grant log
#[derive(Parser, Debug, Clone)]
#[command(
    name = "equity-calc",
    about = "Compute contributor ownership from the monthly grant log",
    version
)]
pub struct Settings {
    /// Grant log to read
    #[arg(long, default_value = "data/grants.json")]
    pub input: PathBuf,

    /// Where to write the ownership table
    #[arg(long, default_value = "data/ownership.json")]
    pub output: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print the report without writing the ownership table
    #[arg(long)]
    pub dry_run: bool,

    /// Print the per-month grant breakdown before the ownership table
    #[arg(long)]
    pub show_grants: bool,
}

impl Settings {
    /// Parse process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
