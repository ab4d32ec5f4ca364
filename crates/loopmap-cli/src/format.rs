/// Console rendering of a [`LoopAnalysis`] in human and JSON modes.
///
/// Human mode prints a banner with the loop count, then a preview of the
/// first few loops. Each loop's closed path is wrapped every
/// [`NODES_PER_LINE`] nodes, with continuation lines indented to start
/// under the first node:
///
/// ```text
/// Loop 1: a -> b -> c
///         -> d -> a
/// ```
///
/// JSON mode prints the whole analysis as one pretty-printed object.
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use loopmap_core::{Cycle, LoopAnalysis, loop_id};

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stdout.
///
/// Colors are off when `--no-color` is passed, when `NO_COLOR` is set, or
/// when stdout is not a TTY.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

/// Nodes shown per line of a wrapped loop path.
pub const NODES_PER_LINE: usize = 3;

const BANNER_WIDTH: usize = 40;
const SEPARATOR_WIDTH: usize = 20;

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for console output, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing and graph statistics to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colors {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Human mode
// ---------------------------------------------------------------------------

/// Renders one loop as `Loop N: a -> b -> c` with its closed path wrapped.
pub fn format_loop(index: usize, cycle: &Cycle) -> String {
    let prefix = format!("{}: ", loop_id(index));
    let indent = " ".repeat(prefix.len());

    let mut closed: Vec<&str> = cycle.nodes().iter().map(String::as_str).collect();
    if let Some(&first) = closed.first() {
        closed.push(first);
    }

    let mut out = prefix;
    for (line, chunk) in closed.chunks(NODES_PER_LINE).enumerate() {
        if line > 0 {
            out.push('\n');
            out.push_str(&indent);
            out.push_str("-> ");
        }
        out.push_str(&chunk.join(" -> "));
    }
    out
}

/// Writes the banner and the first `preview` loops of `analysis`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    analysis: &LoopAnalysis,
    preview: usize,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if analysis.is_empty() {
        return writeln!(writer, "{}", config.paint(ANSI_YELLOW, "No loops found."));
    }

    let total = analysis.loop_count();
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(writer, "{rule}")?;
    writeln!(
        writer,
        "Found {} {}.",
        config.paint(&format!("{ANSI_BOLD}{ANSI_GREEN}"), &total.to_string()),
        pluralize(total, "loop", "loops"),
    )?;
    writeln!(writer, "{rule}")?;

    let shown = preview.min(total);
    if shown == 0 {
        return Ok(());
    }
    writeln!(writer)?;
    writeln!(writer, "--- first {shown} of {total} ---")?;
    let separator = "-".repeat(SEPARATOR_WIDTH);
    for (i, cycle) in analysis.cycles().iter().take(shown).enumerate() {
        writeln!(writer, "{}", format_loop(i, cycle))?;
        writeln!(writer, "{separator}")?;
    }
    Ok(())
}

/// Writes graph statistics and elapsed time to `writer` in verbose mode.
///
/// This is a no-op when `config.verbose` is `false`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_stats_human<W: Write>(
    writer: &mut W,
    analysis: &LoopAnalysis,
    elapsed: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(
        writer,
        "graph: {} {}, {} {} ({} incomplete {} dropped, {} duplicate {})",
        analysis.node_count(),
        pluralize(analysis.node_count(), "node", "nodes"),
        analysis.edge_count(),
        pluralize(analysis.edge_count(), "edge", "edges"),
        analysis.dropped_records(),
        pluralize(analysis.dropped_records(), "row", "rows"),
        analysis.duplicate_edges(),
        pluralize(analysis.duplicate_edges(), "edge", "edges"),
    )?;
    writeln!(writer, "analyzed in {}ms", elapsed.as_millis())
}

// ---------------------------------------------------------------------------
// JSON mode
// ---------------------------------------------------------------------------

/// Writes `analysis` as a single pretty-printed JSON object.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_summary_json<W: Write>(writer: &mut W, analysis: &LoopAnalysis) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, analysis).map_err(std::io::Error::other)?;
    writeln!(writer)
}

fn pluralize<'a>(n: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if n == 1 { singular } else { plural }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
