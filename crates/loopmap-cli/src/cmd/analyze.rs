//! Implementation of `loopmap analyze <file>`.
//!
//! Reads the relationship sheet, builds the graph, enumerates every simple
//! cycle, prints a summary to stdout, and optionally writes the two-tab
//! report workbook.
//!
//! Exit codes: 0 = analysis finished (including zero loops), 1 = enumeration
//! timed out or the report could not be written, 2 = input could not be read.
use std::fs::File;
use std::io::{BufWriter, Cursor, Write as _};
use std::path::Path;
use std::time::{Duration, Instant};

use loopmap_core::{
    Cycle, EnumerateOptions, LoopAnalysis, LoopGraph, build_graph, enumerate_cycles_parallel,
    enumerate_cycles_with,
};
use loopmap_excel::{ImportConfig, export_report, read_connections};
use tracing::{debug, info};

use crate::OutputFormat;
use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::format::{
    FormatterConfig, write_stats_human, write_summary_human, write_summary_json,
};
use crate::io::read_input;

/// Runs the `analyze` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the input cannot be read or lacks the
///   configured sheet or columns.
/// - [`CliError`] exit code 1 if enumeration exceeds `--timeout` or the
///   output cannot be written.
pub fn run(
    args: &AnalyzeArgs,
    max_file_size: u64,
    format: OutputFormat,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let started = Instant::now();

    let bytes = read_input(&args.file, max_file_size)?;
    let import = ImportConfig {
        sheet: args.sheet.clone(),
        from_column: args.from_column.clone(),
        to_column: args.to_column.clone(),
    };
    let records = read_connections(Cursor::new(bytes), &import)?;
    debug!(source = %args.file, records = records.len(), "loaded workbook");

    let graph = build_graph(&records);
    let options = match args.timeout {
        Some(secs) => EnumerateOptions::default().with_timeout(Duration::from_secs(secs)),
        None => EnumerateOptions::default(),
    };
    let cycles = enumerate(&graph, &options, args.parallel)?;
    let analysis = LoopAnalysis::from_graph(&graph, cycles);

    print_summary(&analysis, args.preview, format, config)?;

    if !config.quiet {
        let stderr = std::io::stderr();
        let mut err = stderr.lock();
        write_stats_human(&mut err, &analysis, started.elapsed(), config).map_err(|e| {
            CliError::OutputWriteFailed {
                target: "stderr".to_owned(),
                detail: e.to_string(),
            }
        })?;
    }

    if let Some(path) = &args.output {
        write_report(&analysis, path)?;
        if !config.quiet {
            eprintln!("report written to {}", path.display());
        }
    }
    Ok(())
}

fn enumerate(
    graph: &LoopGraph,
    options: &EnumerateOptions,
    parallel: bool,
) -> Result<Vec<Cycle>, CliError> {
    let cycles = if parallel {
        enumerate_cycles_parallel(graph, options)?
    } else {
        enumerate_cycles_with(graph, options)?
    };
    Ok(cycles)
}

fn print_summary(
    analysis: &LoopAnalysis,
    preview: usize,
    format: OutputFormat,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_summary_human(&mut out, analysis, preview, config),
        OutputFormat::Json => write_summary_json(&mut out, analysis),
    }
    .and_then(|()| out.flush())
    .map_err(|e| CliError::OutputWriteFailed {
        target: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

/// Writes the report workbook to `path`, replacing any existing file.
fn write_report(analysis: &LoopAnalysis, path: &Path) -> Result<(), CliError> {
    let target = path.display().to_string();
    let file = File::create(path).map_err(|e| CliError::OutputWriteFailed {
        target: target.clone(),
        detail: e.to_string(),
    })?;
    export_report(
        &analysis.loop_report(),
        &analysis.edge_tags(),
        BufWriter::new(file),
    )
    .map_err(|e| CliError::output(target.as_str(), &e))?;
    info!(path = %target, loops = analysis.loop_count(), "wrote loop report");
    Ok(())
}
