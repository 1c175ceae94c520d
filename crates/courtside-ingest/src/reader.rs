//! CSV player pool reader.
//!
//! Headers are matched case-insensitively against a list of aliases per
//! field, so both hand-written files and site salary exports load.

use std::io;
use std::path::Path;

use courtside_core::{PlayerPool, PlayerRecord, RejectedRecord};
use csv::StringRecord;
use tracing::{debug, warn};

use crate::error::{IngestError, RowError, RowProblem};

const ID: &[&str] = &["id", "player_id", "playerid"];
const NAME: &[&str] = &["name", "player", "player_name"];
const TEAM: &[&str] = &["team", "teamabbrev", "team_abbrev"];
const POSITION: &[&str] = &["position", "positions", "pos"];
const SALARY: &[&str] = &["salary"];
const PROJECTION: &[&str] = &["projection", "projected_points", "fppg", "points"];

/// Result of reading a pool file.
#[derive(Debug)]
pub struct IngestReport {
    /// Players from every accepted row.
    pub pool: PlayerPool,
    /// Data rows read, accepted or not.
    pub rows_read: usize,
    /// Rejected rows in file order.
    pub rejected: Vec<RowError>,
}

impl IngestReport {
    /// True if every row was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    id: Option<usize>,
    name: usize,
    team: Option<usize>,
    position: usize,
    salary: usize,
    projection: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, IngestError> {
        let find = |aliases: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().trim_start_matches('\u{feff}').to_ascii_lowercase();
                aliases.contains(&h.as_str())
            })
        };
        let require = |column: &'static str, aliases: &'static [&'static str]| {
            find(aliases).ok_or(IngestError::MissingColumn {
                column,
                accepted: aliases,
            })
        };
        Ok(Self {
            id: find(ID),
            name: require("name", NAME)?,
            team: find(TEAM),
            position: require("position", POSITION)?,
            salary: require("salary", SALARY)?,
            projection: require("projection", PROJECTION)?,
        })
    }

    fn parse(&self, record: &StringRecord) -> Result<PlayerRecord, RowProblem> {
        let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");
        let required = |idx: usize, column: &'static str| {
            let value = field(idx);
            if value.is_empty() {
                Err(RowProblem::MissingField { column })
            } else {
                Ok(value)
            }
        };

        let name = required(self.name, "name")?;
        // Without an id column the name identifies the player.
        let id = match self.id {
            Some(idx) => required(idx, "id")?,
            None => name,
        };
        let team = self.team.map(field).unwrap_or("");
        let position = required(self.position, "position")?;
        let salary = parse_salary(required(self.salary, "salary")?)?;
        let projection = parse_projection(required(self.projection, "projection")?)?;

        Ok(PlayerRecord::new(id, name, team, &[position], salary, projection))
    }
}

/// Accepts `8000`, `8,000` and `$8,000`.
fn parse_salary(value: &str) -> Result<i64, RowProblem> {
    let cleaned: String = value.chars().filter(|c| !matches!(c, '$' | ',' | '_')).collect();
    cleaned
        .trim()
        .parse::<i64>()
        .map_err(|_| RowProblem::BadNumber {
            column: "salary",
            value: value.to_string(),
        })
}

fn parse_projection(value: &str) -> Result<f64, RowProblem> {
    value.parse::<f64>().map_err(|_| RowProblem::BadNumber {
        column: "projection",
        value: value.to_string(),
    })
}

/// Reads a player pool from CSV data with a header row.
///
/// # Errors
///
/// Returns [`IngestError`] if the header row cannot be read or lacks a
/// required column. Problems with individual rows are collected in
/// [`IngestReport::rejected`] instead.
pub fn read_pool<R: io::Read>(reader: R) -> Result<IngestReport, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::resolve(reader.headers()?)?;

    let mut records: Vec<PlayerRecord> = Vec::new();
    let mut record_rows: Vec<usize> = Vec::new();
    let mut rejected: Vec<RowError> = Vec::new();
    let mut rows_read = 0;

    for (i, result) in reader.records().enumerate() {
        rows_read += 1;
        let fallback_row = i + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                rejected.push(RowError {
                    row: fallback_row,
                    problem: RowProblem::Malformed(e.to_string()),
                });
                continue;
            }
        };
        let row = record
            .position()
            .map_or(fallback_row, |p| p.line() as usize);
        match columns.parse(&record) {
            Ok(parsed) => {
                records.push(parsed);
                record_rows.push(row);
            }
            Err(problem) => rejected.push(RowError { row, problem }),
        }
    }

    let (pool, invalid) = PlayerPool::from_records(records);
    rejected.extend(
        invalid
            .into_iter()
            .map(|RejectedRecord { index, error }| RowError {
                row: record_rows[index],
                problem: RowProblem::Invalid(error),
            }),
    );
    rejected.sort_by_key(|r| r.row);

    for r in &rejected {
        warn!(event = "row_rejected", row = r.row, reason = %r.problem);
    }
    debug!(
        event = "pool_loaded",
        rows = rows_read,
        players = pool.len(),
        rejected = rejected.len(),
    );

    Ok(IngestReport {
        pool,
        rows_read,
        rejected,
    })
}

/// Reads a player pool from a CSV file.
pub fn read_pool_from_path(path: impl AsRef<Path>) -> Result<IngestReport, IngestError> {
    let file = std::fs::File::open(path)?;
    read_pool(io::BufReader::new(file))
}
