//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for bibsync using clap.
//! The flag set is flat (no subcommands): one invocation performs one sync
//! run against the configured feed and API.

use crate::core::resolver::SnapshotSelector;
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;

/// Bibsync - Base Bibliotek to ILS patron sync
#[derive(Parser, Debug)]
#[command(name = "bibsync")]
#[command(version, about, long_about = None)]
#[command(author = "Bibsync Contributors")]
#[command(after_help = "Use -h or --help to print this help; a bare -? is not a recognized flag.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short = 'c', long = "configfile", value_name = "PATH", env = "BIBSYNC_CONFIG")]
    pub configfile: PathBuf,

    /// Path to the field-mapping file
    #[arg(short = 'm', long = "mapfile", value_name = "PATH", env = "BIBSYNC_MAPFILE")]
    pub mapfile: PathBuf,

    /// Sync the daily diff for this date (YYYY-MM-DD) instead of today
    #[arg(short = 'd', long, value_name = "YYYY-MM-DD", value_parser = parse_sync_date)]
    pub date: Option<String>,

    /// Download and sync the full dump instead of a daily diff
    #[arg(long)]
    pub full: bool,

    /// Sync an already-downloaded snapshot file (never downloads)
    #[arg(short = 'f', long, value_name = "PATH", value_parser = parse_existing_file, conflicts_with = "date")]
    pub file: Option<PathBuf>,

    /// Only process the first N records
    #[arg(short = 'l', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Print a message for every record plus a final summary line
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log request/response detail for every API call
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Derive the snapshot selector from the parsed flags.
    ///
    /// An explicit file wins over everything; `--full` wins over `--date`
    /// (the conflicting `--file`/`--date` combination is rejected at parse
    /// time); with no selection flag the run uses today's daily diff.
    pub fn selector(&self) -> SnapshotSelector {
        if let Some(ref file) = self.file {
            SnapshotSelector::File(file.clone())
        } else if self.full {
            SnapshotSelector::Full
        } else if let Some(ref date) = self.date {
            SnapshotSelector::Date(date.clone())
        } else {
            SnapshotSelector::Today
        }
    }
}

/// Validate a `--date` value.
///
/// The feed publishes diffs named by ISO date, so the value must look like
/// `20\d\d-[01]\d-[0123]\d` (a format check, not a calendar check).
fn parse_sync_date(value: &str) -> Result<String, String> {
    let re = Regex::new(r"^20\d\d-[01]\d-[0123]\d$").expect("date pattern is valid");
    if re.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "invalid date '{value}': expected YYYY-MM-DD (e.g. 2015-02-06)"
        ))
    }
}

/// Validate a `--file` value: the snapshot must already exist locally.
fn parse_existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file not found: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn base_args() -> Vec<&'static str> {
        vec!["bibsync", "-c", "bibsync.toml", "-m", "mapping.toml"]
    }

    #[test]
    fn test_cli_parse_minimal() {
        let cli = Cli::parse_from(base_args());
        assert_eq!(cli.configfile, PathBuf::from("bibsync.toml"));
        assert_eq!(cli.mapfile, PathBuf::from("mapping.toml"));
        assert!(!cli.full);
        assert!(!cli.verbose);
        assert!(!cli.debug);
        assert!(cli.date.is_none());
        assert!(cli.file.is_none());
        assert!(cli.limit.is_none());
        assert!(matches!(cli.selector(), SnapshotSelector::Today));
    }

    #[test]
    fn test_cli_requires_configfile_and_mapfile() {
        assert!(Cli::try_parse_from(["bibsync"]).is_err());
        assert!(Cli::try_parse_from(["bibsync", "-c", "bibsync.toml"]).is_err());
        assert!(Cli::try_parse_from(["bibsync", "-m", "mapping.toml"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_date() {
        let mut args = base_args();
        args.extend(["--date", "2015-02-06"]);
        let cli = Cli::parse_from(args);
        assert_eq!(cli.date.as_deref(), Some("2015-02-06"));
        assert!(matches!(cli.selector(), SnapshotSelector::Date(ref d) if d == "2015-02-06"));
    }

    #[test_case("2015-02-06" => true; "valid date")]
    #[test_case("2099-12-31" => true; "upper bound")]
    #[test_case("2015-13-40" => false; "month and day out of range")]
    #[test_case("15-02-06" => false; "two digit year")]
    #[test_case("2015-2-6" => false; "unpadded")]
    #[test_case("1999-02-06" => false; "pre 2000")]
    fn test_date_validation(value: &str) -> bool {
        parse_sync_date(value).is_ok()
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let mut args = base_args();
        args.extend(["--date", "2015-13-40"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_file_and_date_conflict() {
        // The file must exist so the value parser passes and the conflict
        // check is what rejects the combination
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().to_string_lossy().to_string();

        let mut args: Vec<String> = base_args().iter().map(|s| s.to_string()).collect();
        args.extend([
            "--file".to_string(),
            path,
            "--date".to_string(),
            "2015-02-06".to_string(),
        ]);
        let err = Cli::try_parse_from(args).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_file_must_exist() {
        let mut args = base_args();
        args.extend(["--file", "/nonexistent/bb.xml"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parse_with_existing_file() {
        use std::io::Write;
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"<base/>").unwrap();
        let path_str = tmp.path().to_string_lossy().to_string();

        let mut args = base_args();
        args.push("--file");
        args.push(&path_str);
        let cli = Cli::parse_from(args.iter().map(|s| s.to_string()));
        assert!(matches!(cli.selector(), SnapshotSelector::File(_)));
    }

    #[test]
    fn test_cli_help_names_the_help_flags() {
        let err = Cli::try_parse_from(["bibsync", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("-h or --help"));
    }

    #[test]
    fn test_cli_full_selector() {
        let mut args = base_args();
        args.push("--full");
        let cli = Cli::parse_from(args);
        assert!(matches!(cli.selector(), SnapshotSelector::Full));
    }

    #[test]
    fn test_cli_full_wins_over_date() {
        let mut args = base_args();
        args.extend(["--full", "--date", "2015-02-06"]);
        let cli = Cli::parse_from(args);
        assert!(matches!(cli.selector(), SnapshotSelector::Full));
    }

    #[test]
    fn test_cli_parse_limit_and_flags() {
        let mut args = base_args();
        args.extend(["--limit", "10", "--verbose", "--debug"]);
        let cli = Cli::parse_from(args);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(cli.debug);
    }
}
