use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "courtside")]
#[command(about = "Salary-capped lineup optimizer for NBA daily fantasy contests")]
#[command(version)]
pub struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build lineups from a player CSV
    Optimize(OptimizeArgs),
    /// Validate a player CSV without solving
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct OptimizeArgs {
    /// Player pool CSV
    #[arg(long, value_name = "CSV")]
    pub players: PathBuf,

    /// Contest configuration (TOML, or YAML by extension)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of lineups to build
    #[arg(long, value_name = "N")]
    pub lineups: Option<usize>,

    /// Minimum number of differing players between any two lineups
    #[arg(long, value_name = "K")]
    pub min_unique: Option<usize>,

    /// Time limit for each solve, in milliseconds
    #[arg(long, value_name = "MS")]
    pub time_limit_ms: Option<u64>,

    /// Write the lineups to this CSV file
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Player pool CSV
    #[arg(long, value_name = "CSV")]
    pub players: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_optimize() {
        let cli = Cli::try_parse_from([
            "courtside",
            "optimize",
            "--players",
            "slate.csv",
            "--lineups",
            "20",
            "--min-unique",
            "3",
            "--time-limit-ms",
            "500",
            "-o",
            "out.csv",
        ])
        .unwrap();
        let Commands::Optimize(args) = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(args.players, PathBuf::from("slate.csv"));
        assert_eq!(args.lineups, Some(20));
        assert_eq!(args.min_unique, Some(3));
        assert_eq!(args.time_limit_ms, Some(500));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
        assert!(args.config.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_players_required() {
        assert!(Cli::try_parse_from(["courtside", "check"]).is_err());
        let cli = Cli::try_parse_from(["courtside", "check", "--players", "p.csv", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
