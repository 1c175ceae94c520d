use std::io::Write;
use std::process::ExitCode;

use courtside::{OptimizerConfig, TerminationConfig};

use crate::cli::{CheckArgs, OptimizeArgs};
use crate::display;
use crate::error::Result;

pub fn optimize(args: &OptimizeArgs, out: &mut impl Write) -> Result<ExitCode> {
    let report = courtside::read_pool_from_path(&args.players)?;
    display::write_report(&report, out)?;

    let config = load_config(args)?;
    let set = courtside::optimize(&report.pool, &config)?;
    writeln!(out)?;
    display::write_lineup_set(&set, out)?;

    if let Some(path) = &args.output {
        let roster = config.roster_spec()?;
        courtside::write_lineups_to_path(&set, &roster, path)?;
        writeln!(out, "Wrote {} lineups to {}", set.len(), path.display())?;
    }
    Ok(ExitCode::SUCCESS)
}

pub fn check(args: &CheckArgs, out: &mut impl Write) -> Result<ExitCode> {
    let report = courtside::read_pool_from_path(&args.players)?;
    display::write_report(&report, out)?;
    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

/// Reads `--config` (defaults when absent) and applies the command-line
/// overrides on top.
fn load_config(args: &OptimizeArgs) -> Result<OptimizerConfig> {
    let mut config = match &args.config {
        Some(path) => OptimizerConfig::load(path)?,
        None => OptimizerConfig::default(),
    };
    if let Some(lineups) = args.lineups {
        config = config.with_lineups(lineups);
    }
    if let Some(min_unique) = args.min_unique {
        config = config.with_min_unique(min_unique);
    }
    if let Some(millis) = args.time_limit_ms {
        // Replaces any seconds limit from the file.
        config.termination = Some(TerminationConfig {
            seconds_spent_limit: None,
            millis_spent_limit: Some(millis),
            ..config.termination.unwrap_or_default()
        });
    }
    Ok(config)
}
