//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for PathOrStdin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdin => f.write_str("-"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored summary (default).
    Human,
    /// A single pretty-printed JSON object.
    Json,
}

/// Arguments for `loopmap analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to an .xlsx workbook, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub file: PathOrStdin,

    /// Sheet holding the relationship rows.
    #[arg(long, default_value = loopmap_excel::DEFAULT_SHEET)]
    pub sheet: String,

    /// Header of the source column (case-insensitive).
    #[arg(long, default_value = loopmap_excel::DEFAULT_FROM_COLUMN)]
    pub from_column: String,

    /// Header of the target column (case-insensitive).
    #[arg(long, default_value = loopmap_excel::DEFAULT_TO_COLUMN)]
    pub to_column: String,

    /// Write the two-tab loop report workbook to this path.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of loops printed in human mode.
    #[arg(long, default_value = "5", value_name = "N")]
    pub preview: usize,

    /// Abort cycle enumeration after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enumerate cycles on all cores.
    #[arg(long)]
    pub parallel: bool,
}

/// All top-level subcommands exposed by the `loopmap` binary.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find every feedback loop in a relationship workbook.
    Analyze(AnalyzeArgs),

    /// Print the loopmap-core library version.
    Version,
}

/// Root CLI struct for the `loopmap` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser, Debug)]
#[command(
    name = "loopmap",
    version,
    about = "Find feedback loops in directed relationship maps",
    long_about = "Reads a From/To relationship sheet from an .xlsx workbook, enumerates\n\
                  every simple directed cycle, and reports each loop along with the\n\
                  loop tags carried by every edge."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: timing, graph statistics, debug logs
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `LOOPMAP_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "LOOPMAP_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
