//! Courtside Ingest - tabular player data in, lineups out
//!
//! Reads a player pool from CSV, collecting malformed rows into a report
//! instead of failing the whole file, and writes lineup sets back to CSV.
//!
//! # Example
//!
//! ```
//! use courtside_ingest::read_pool;
//!
//! let data = "\
//! id,name,team,position,salary,projection
//! 1,Luka Vance,DAL,PG/SG,11200,58.4
//! 2,Broken Row,DAL,SG,lots,40
//! ";
//! let report = read_pool(data.as_bytes()).unwrap();
//! assert_eq!(report.pool.len(), 1);
//! assert_eq!(report.rejected.len(), 1);
//! assert_eq!(report.rejected[0].row, 3);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{IngestError, RowError, RowProblem};
pub use reader::{read_pool, read_pool_from_path, IngestReport};
pub use writer::{write_lineups, write_lineups_to_path};
