use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftclock:
/// punch work and break events, review sessions and monthly earnings.
#[derive(Parser, Debug)]
#[command(
    name = "shiftclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Punch-clock CLI: record work/break events, rebuild sessions and estimate monthly earnings",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as another owner than the configured one
    #[arg(global = true, long = "owner")]
    pub owner: Option<String>,

    /// Run in test mode (configuration file is neither read nor written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Record a punch (in, out, break, resume)
    Punch {
        /// work_start | work_end | break_start | break_end (aliases: in, out, break, resume)
        kind: String,

        /// Punch time: HH:MM today, or "YYYY-MM-DD HH:MM"
        #[arg(long = "at")]
        at: Option<String>,

        #[arg(long = "note")]
        note: Option<String>,

        /// Accept advisory warnings without asking
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Show the current state and month totals
    Status,

    /// List sessions of a month
    List {
        #[arg(long, short, value_name = "YYYY-MM", help = "Month to show (default: current)")]
        period: Option<String>,

        #[arg(long = "events", help = "List raw punch events instead of sessions")]
        events: bool,
    },

    /// Backfill a complete session on a date
    Add {
        /// Work date (YYYY-MM-DD)
        date: String,

        #[arg(long = "in", value_name = "HH:MM")]
        start: String,

        #[arg(long = "out", value_name = "HH:MM")]
        end: String,

        /// The end time is on the following calendar day
        #[arg(long = "next-day")]
        next_day: bool,

        /// Break as START-END (HH:MM-HH:MM); repeatable
        #[arg(long = "break", value_name = "HH:MM-HH:MM")]
        breaks: Vec<String>,
    },

    /// Replace a session with new times
    Edit {
        /// Work date (YYYY-MM-DD)
        date: String,

        /// Session number on that date (1 = earliest)
        #[arg(long = "session", short = 's', default_value_t = 1)]
        session: usize,

        #[arg(long = "in", value_name = "HH:MM")]
        start: String,

        #[arg(long = "out", value_name = "HH:MM")]
        end: String,

        #[arg(long = "next-day")]
        next_day: bool,

        #[arg(long = "break", value_name = "HH:MM-HH:MM")]
        breaks: Vec<String>,
    },

    /// Delete one session, or every event of a date
    Del {
        #[arg(long = "session", short = 's', help = "Session number to delete")]
        session: Option<usize>,

        date: String,
    },

    /// Show or set the hourly rate
    Rate {
        #[arg(allow_negative_numbers = true)]
        value: Option<f64>,
    },

    /// Export a month of sessions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, short, value_name = "YYYY-MM")]
        period: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
