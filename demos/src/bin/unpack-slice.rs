use std::io::Write;

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;
use symslice::{
    NormalizedSlice, OverflowPolicy, Slice, SliceNormalizer, SymInt, SymbolicStepPolicy,
    UnpackOptions,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "unpack-slice")]
#[command(about = "Normalize slice expressions such as '1:-1', '::-2' or 's0:n:2'")]
#[command(after_help = "Expressions starting with '-' (like '-3:') must follow a '--' separator: \
                        unpack-slice --json -- -3: ::-1")]
struct Cli {
    /// Slice expressions in start:stop[:step] notation; identifiers are symbols
    #[arg(required = true, allow_negative_numbers = true)]
    slices: Vec<String>,

    /// Accept a symbolic step instead of rejecting it
    #[arg(long)]
    allow_symbolic_step: bool,

    /// Reject integers outside the 64-bit index range instead of clamping
    #[arg(long)]
    strict_overflow: bool,

    /// Print one JSON object per expression
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> UnpackOptions {
        UnpackOptions::new()
            .with_symbolic_step(if self.allow_symbolic_step {
                SymbolicStepPolicy::Allow
            } else {
                SymbolicStepPolicy::Reject
            })
            .with_overflow(if self.strict_overflow {
                OverflowPolicy::Error
            } else {
                OverflowPolicy::Clamp
            })
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<NormalizedSlice<SymInt>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> Report<'a> {
    fn new(input: &'a str, result: Result<NormalizedSlice<SymInt>>) -> Self {
        match result {
            Ok(normalized) => Self {
                input,
                normalized: Some(normalized),
                error: None,
            },
            Err(e) => Self {
                input,
                normalized: None,
                error: Some(format!("{e:#}")),
            },
        }
    }

    fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string(self)?);
        }
        Ok(match (&self.normalized, &self.error) {
            (Some(normalized), _) => format!("{} -> {normalized}", self.input),
            (None, Some(error)) => format!("{} -> error: {error}", self.input),
            (None, None) => format!("{} -> error", self.input),
        })
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn normalize(normalizer: &SliceNormalizer, input: &str) -> Result<NormalizedSlice<SymInt>> {
    let slice: Slice<SymInt> = input.parse()?;
    tracing::debug!(input, parsed = %slice, "parsed slice expression");
    Ok(normalizer.unpack(&slice)?)
}

/// Writes one line per expression and returns how many failed.
fn run(cli: &Cli, out: &mut impl Write) -> Result<usize> {
    let normalizer = SliceNormalizer::new(cli.options());
    tracing::debug!(options = ?normalizer.options(), "normalizer configured");

    let mut failures = 0usize;
    for input in &cli.slices {
        let report = Report::new(input, normalize(&normalizer, input));
        if let Some(error) = &report.error {
            failures += 1;
            tracing::warn!(input = %input, %error, "failed to normalize slice");
        }
        writeln!(out, "{}", report.render(cli.json)?)?;
    }
    Ok(failures)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let failures = run(&cli, &mut std::io::stdout().lock())?;
    if failures > 0 {
        bail!("{failures} of {} slice expression(s) failed", cli.slices.len());
    }
    Ok(())
}
