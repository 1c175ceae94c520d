//! Colorful console output for optimizer progress.
//!
//! Provides a `tracing` layer that renders the solver's lifecycle events
//! (`generation_start`, `solve_end`, `lineup_accepted`, ...) as colored lines
//! on stderr, keeping stdout free for lineups.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "courtside_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Honors
/// `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(OptimizerConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats optimizer events with colors.
pub struct OptimizerConsoleLayer;

impl<S: Subscriber> Layer<S> for OptimizerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("courtside") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    outcome: Option<String>,
    score: Option<String>,
    reason: Option<String>,
    players: Option<u64>,
    slots: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    requested: Option<u64>,
    lineups: Option<u64>,
    index: Option<u64>,
    nodes: Option<u64>,
    pruned: Option<u64>,
    salary: Option<u64>,
    points_milli: Option<u64>,
    duration_ms: Option<u64>,
    points: Option<f64>,
    certified: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "status" => self.status = Some(value),
            "outcome" => self.outcome = Some(value),
            "score" => self.score = Some(value),
            "reason" => self.reason = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "players" => self.players = Some(value),
            "slots" => self.slots = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "requested" => self.requested = Some(value),
            "lineups" => self.lineups = Some(value),
            "index" => self.index = Some(value),
            "nodes" => self.nodes = Some(value),
            "pruned" => self.pruned = Some(value),
            "salary" => self.salary = Some(value),
            "points_milli" => self.points_milli = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "points" {
            self.points = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "certified" {
            self.certified = Some(value);
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    let body = match v.event.as_deref() {
        Some("generation_start") => format_generation_start(v),
        Some("solve_end") => format_solve_end(v),
        Some("lineup_accepted") => format_lineup_accepted(v),
        Some("lineup_uncertified") => format_uncertified(v),
        Some("precheck_failed") => format_precheck_failed(v),
        Some("search_end") => format_search_end(v),
        Some("incumbent") => format_incumbent(v),
        Some("generation_end") => return format_generation_end(v),
        _ => return String::new(),
    };
    format!("{} {} {}", timestamp().bright_black(), level_label(level), body)
}

fn level_label(level: Level) -> String {
    match level {
        Level::ERROR => "ERROR".bright_red().to_string(),
        Level::WARN => " WARN".yellow().to_string(),
        Level::INFO => " INFO".bright_green().to_string(),
        _ => "DEBUG".bright_blue().to_string(),
    }
}

fn format_generation_start(v: &EventVisitor) -> String {
    format!(
        "{} players ({}), slots ({}), variables ({}), constraints ({}), lineups requested ({})",
        "[Generator]".bright_cyan(),
        v.players.unwrap_or(0).bright_yellow(),
        v.slots.unwrap_or(0).bright_yellow(),
        v.variables.unwrap_or(0).bright_yellow(),
        v.constraints.unwrap_or(0).bright_yellow(),
        v.requested.unwrap_or(0).bright_yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let outcome = v.outcome.as_deref().unwrap_or("N/A");
    format!(
        "{} solve #{} ended: {} in {} ({} nodes)",
        "[Search]".bright_cyan(),
        v.index.unwrap_or(0) + 1,
        format_outcome(outcome),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        group_digits(v.nodes.unwrap_or(0)).white(),
    )
}

fn format_lineup_accepted(v: &EventVisitor) -> String {
    let marker = if v.certified.unwrap_or(false) {
        "optimal".bright_green().to_string()
    } else {
        "uncertified".yellow().to_string()
    };
    format!(
        "    {} lineup #{} | {} pts | ${} | {}",
        "->".bright_blue(),
        v.index.unwrap_or(0) + 1,
        format!("{:.2}", v.points.unwrap_or(0.0)).bright_magenta().bold(),
        group_digits(v.salary.unwrap_or(0)),
        marker,
    )
}

fn format_uncertified(v: &EventVisitor) -> String {
    format!(
        "{} lineup #{} stopped before optimality was proven ({})",
        "[Search]".bright_cyan(),
        v.index.unwrap_or(0) + 1,
        v.score.as_deref().unwrap_or("N/A"),
    )
}

fn format_precheck_failed(v: &EventVisitor) -> String {
    format!(
        "{} no lineup #{} can exist: {}",
        "[Model]".bright_cyan(),
        v.index.unwrap_or(0) + 1,
        v.reason.as_deref().unwrap_or("unknown"),
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    format!(
        "{} {} after {} nodes, {} pruned",
        "[Search]".bright_cyan(),
        v.outcome.as_deref().unwrap_or("N/A"),
        group_digits(v.nodes.unwrap_or(0)),
        group_digits(v.pruned.unwrap_or(0)),
    )
}

fn format_incumbent(v: &EventVisitor) -> String {
    let points = v.points_milli.unwrap_or(0) as f64 / 1000.0;
    format!(
        "    {} node {:>9} | {:.2} pts | ${}",
        "*".bright_blue(),
        group_digits(v.nodes.unwrap_or(0)),
        points,
        group_digits(v.salary.unwrap_or(0)),
    )
}

fn format_generation_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("N/A");
    let lineups = v.lineups.unwrap_or(0);
    let requested = v.requested.unwrap_or(0);

    let mut output = format!(
        "{} {} {} Generation ended: status ({})",
        timestamp().bright_black(),
        level_label(Level::INFO),
        "[Generator]".bright_cyan(),
        format_status(status),
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    for (label, value) in [
        ("Lineups:", format!("{} / {}", lineups, requested)),
        ("Nodes explored:", group_digits(v.nodes.unwrap_or(0))),
        ("Time spent:", format_duration_ms(v.duration_ms.unwrap_or(0))),
    ] {
        output.push_str(&format!(
            "{}  {:<18}{:>20}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(&"╚══════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_outcome(outcome: &str) -> String {
    if outcome.starts_with("Optimal") {
        outcome.bright_green().to_string()
    } else if outcome.starts_with("Feasible") {
        outcome.yellow().to_string()
    } else {
        outcome.bright_red().to_string()
    }
}

fn format_status(status: &str) -> String {
    match status {
        "Done" => status.bright_green().bold().to_string(),
        "Exhausted" => status.yellow().bold().to_string(),
        _ => status.bright_red().bold().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(12_345_678), "12,345,678");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1_500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let v = EventVisitor {
            event: Some("solve_start".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::INFO, &v).is_empty());
        assert!(format_event(Level::INFO, &EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_lineup_accepted_line() {
        let v = EventVisitor {
            event: Some("lineup_accepted".into()),
            index: Some(0),
            points: Some(95.0),
            salary: Some(15_000),
            certified: Some(true),
            ..EventVisitor::default()
        };
        let line = format_event(Level::INFO, &v);
        assert!(line.contains("lineup #1"));
        assert!(line.contains("95.00"));
        assert!(line.contains("15,000"));
        assert!(line.contains("optimal"));
    }

    #[test]
    fn test_generation_summary_box() {
        let v = EventVisitor {
            event: Some("generation_end".into()),
            status: Some("Exhausted".into()),
            lineups: Some(2),
            requested: Some(3),
            nodes: Some(4_200),
            duration_ms: Some(12),
            ..EventVisitor::default()
        };
        let out = format_event(Level::INFO, &v);
        assert!(out.contains("Exhausted"));
        assert!(out.contains("2 / 3"));
        assert!(out.contains("4,200"));
        assert!(out.contains("12ms"));
    }
}
