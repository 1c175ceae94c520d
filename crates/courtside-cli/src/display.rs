use std::io::{self, Write};

use courtside::{GenerationStatus, IngestReport, Lineup, LineupSet};
use owo_colors::OwoColorize;

use crate::error::CliError;

pub fn print_error(error: &CliError) {
    let _ = writeln!(io::stderr(), "{} {}", "error:".bright_red().bold(), error);
}

pub fn write_report(report: &IngestReport, out: &mut impl Write) -> io::Result<()> {
    let accepted = report.pool.len();
    writeln!(
        out,
        "{} {} of {} rows accepted, {} teams",
        "Players:".bold(),
        accepted.bright_green(),
        report.rows_read,
        report.pool.teams().len(),
    )?;
    for rejected in &report.rejected {
        writeln!(out, "  {} {}", "rejected".yellow(), rejected)?;
    }
    Ok(())
}

pub fn write_lineup(rank: usize, lineup: &Lineup, out: &mut impl Write) -> io::Result<()> {
    let marker = if lineup.is_certified_optimal() {
        String::new()
    } else {
        format!(" {}", "(not proven optimal)".yellow())
    };
    writeln!(
        out,
        "{} {:.2} pts, ${}{}",
        format!("#{}", rank).bright_cyan().bold(),
        lineup.total_projection(),
        lineup.total_salary(),
        marker,
    )?;
    for a in lineup.assignments() {
        let p = a.player();
        writeln!(
            out,
            "  {:<5} {:<24} {:<4} ${:>6} {:>7.2}",
            a.slot(),
            p.name(),
            p.team(),
            p.salary(),
            p.projection(),
        )?;
    }
    Ok(())
}

pub fn write_lineup_set(set: &LineupSet, out: &mut impl Write) -> io::Result<()> {
    for (i, lineup) in set.iter().enumerate() {
        write_lineup(i + 1, lineup, out)?;
        writeln!(out)?;
    }

    let status = match set.status() {
        GenerationStatus::Done => "Done".bright_green().to_string(),
        GenerationStatus::Exhausted => "Exhausted".yellow().to_string(),
        GenerationStatus::TimedOut => "TimedOut".bright_red().to_string(),
    };
    writeln!(
        out,
        "{} {} ({} of {} lineups)",
        "Status:".bold(),
        status,
        set.len(),
        set.requested(),
    )?;
    if set.shortfall() > 0 {
        writeln!(
            out,
            "  {} fewer lineups than requested: {}",
            "note:".yellow(),
            set.shortfall()
        )?;
    }
    Ok(())
}
