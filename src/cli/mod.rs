//! CLI module - Command-line interface for Dienstplan
//!
//! The web service is the default; the other commands work directly on the
//! data directory and are meant for operators on the host.

mod commands;

use clap::{Parser, Subcommand};

/// Dienstplan - Roster and staffing check for a volunteer fire brigade
#[derive(Parser)]
#[command(name = "dienstplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Print the staffing check for the current data
    #[command(alias = "-c", alias = "--check")]
    Check,

    /// List vehicles
    #[command(alias = "fahrzeuge")]
    Vehicles,

    /// List personnel
    #[command(alias = "ls")]
    Kameraden,

    /// Replace all personnel with generated sample data
    SeedKameraden {
        /// Confirm that existing personnel will be overwritten
        #[arg(long)]
        yes: bool,
    },

    /// Show the current crew assignment
    #[command(alias = "crew")]
    Einteilung {
        /// Assign all personnel anew and save the result
        #[arg(long)]
        run: bool,
    },
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["dienstplan"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_seed_requires_flag_to_be_explicit() {
        let cli = Cli::try_parse_from(["dienstplan", "seed-kameraden"]).unwrap();
        assert_eq!(cli.command, Some(Commands::SeedKameraden { yes: false }));

        let cli = Cli::try_parse_from(["dienstplan", "seed-kameraden", "--yes"]).unwrap();
        assert_eq!(cli.command, Some(Commands::SeedKameraden { yes: true }));
    }

    #[test]
    fn test_einteilung_shows_unless_run() {
        let cli = Cli::try_parse_from(["dienstplan", "crew"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Einteilung { run: false }));

        let cli = Cli::try_parse_from(["dienstplan", "einteilung", "--run"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Einteilung { run: true }));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["dienstplan", "daemon"]).is_err());
    }
}
