//! Check command
//!
//! Usage: matchx check --actual <FILE> --expected <FILE> [--fail-deployment] [--json]

use clap::Args;
use matchx_core::assertion::{handle, AssertionRequest, AssertionStatus};
use matchx_core::errors::{ExError, ExErrorKind};
use matchx_core::{log_op_end, log_op_error, log_op_start};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// File holding the actual value (JSON, or raw text)
    #[arg(long)]
    pub actual: PathBuf,

    /// File holding the expected pattern (JSON wire encoding)
    #[arg(long)]
    pub expected: PathBuf,

    /// Treat a failed assertion as an error
    #[arg(long)]
    pub fail_deployment: bool,

    /// Print the assertion result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute check command. Returns whether the assertion passed.
pub fn execute(args: CheckArgs) -> Result<bool, Box<dyn std::error::Error>> {
    log_op_start!("cli_check", actual = %args.actual.display());
    let start = Instant::now();

    let request = AssertionRequest {
        actual: Some(read_input(&args.actual)?),
        expected: read_input(&args.expected)?,
        fail_deployment: args.fail_deployment,
        request_id: None,
    };

    let result = handle(&request).map_err(|e| {
        log_op_error!(
            "cli_check",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        match result.status()? {
            AssertionStatus::Success => println!("<match>"),
            AssertionStatus::Fail { message } => println!("{}", message),
        }
    }

    log_op_end!(
        "cli_check",
        duration_ms = start.elapsed().as_millis() as u64,
        failed = result.failed
    );

    Ok(!result.failed)
}

/// Read an input file, dropping the trailing line break editors add
fn read_input(path: &Path) -> Result<String, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("cli_check")
            .with_message(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(text
        .strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t))
        .unwrap_or(text.as_str())
        .to_string())
}
