//! Lineup CSV export.

use std::io;
use std::path::Path;

use courtside_core::{LineupSet, RosterSpec};

use crate::error::IngestError;

/// Writes one row per lineup: rank, one column per roster slot, salary,
/// projection and whether the lineup is certified optimal.
///
/// Slot cells hold `Name (id)`.
///
/// # Example
///
/// ```
/// use courtside_core::{GenerationStatus, LineupSet, RosterSpec};
/// use courtside_ingest::write_lineups;
///
/// let set = LineupSet::new(Vec::new(), 1, GenerationStatus::Exhausted);
/// let mut out = Vec::new();
/// write_lineups(&set, &RosterSpec::draftkings_classic(), &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "rank,PG,SG,SF,PF,C,G,F,UTIL,salary,projection,certified\n"
/// );
/// ```
pub fn write_lineups<W: io::Write>(
    set: &LineupSet,
    roster: &RosterSpec,
    writer: W,
) -> Result<(), IngestError> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = Vec::with_capacity(roster.len() + 4);
    header.push("rank");
    header.extend(roster.labels());
    header.extend(["salary", "projection", "certified"]);
    out.write_record(&header)?;

    for (rank, lineup) in set.iter().enumerate() {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        row.push((rank + 1).to_string());
        row.extend(
            lineup
                .assignments()
                .iter()
                .map(|a| format!("{} ({})", a.player().name(), a.player().id())),
        );
        row.push(lineup.total_salary().to_string());
        row.push(format!("{:.2}", lineup.total_projection()));
        row.push(lineup.is_certified_optimal().to_string());
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes a lineup set to a CSV file, replacing any existing file.
pub fn write_lineups_to_path(
    set: &LineupSet,
    roster: &RosterSpec,
    path: impl AsRef<Path>,
) -> Result<(), IngestError> {
    let file = std::fs::File::create(path)?;
    write_lineups(set, roster, io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::{GenerationStatus, Lineup, SlotAssignment};
    use courtside_test::fixtures::{scenario_pool, two_guard_roster};

    fn sample_set() -> LineupSet {
        let pool = scenario_pool();
        let lineup = Lineup::new(
            vec![
                SlotAssignment::new("PG", pool.players()[0].clone()),
                SlotAssignment::new("SG", pool.players()[1].clone()),
            ],
            false,
        );
        LineupSet::new(vec![lineup], 1, GenerationStatus::TimedOut)
    }

    #[test]
    fn test_rows() {
        let mut out = Vec::new();
        write_lineups(&sample_set(), &two_guard_roster(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "rank,PG,SG,salary,projection,certified");
        assert_eq!(
            lines[1],
            "1,Alpha Guard (A),Bravo Wing (B),15000,95.00,false"
        );
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineups.csv");
        write_lineups_to_path(&sample_set(), &two_guard_roster(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], "15000");
    }
}
