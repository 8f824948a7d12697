//! Logbook CLI
//!
//! Command-line client for the activity logbook.
//!
//! # Commands
//!
//! - `list` - Show one page of entries, most recent first
//! - `show` - Show one entry in detail
//! - `add` - Create an entry
//! - `edit` - Change fields of an entry
//! - `delete` - Remove an entry
//! - `export` - Write the filtered entries to CSV
//! - `statuses` - List the status values in use

mod commands;
mod output;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Activity logbook client.
#[derive(Parser, Debug)]
#[command(name = "logbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the logbook data file
    #[arg(global = true, short, long, default_value = "logbook.json")]
    data: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Search and status selection shared by several commands.
#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Case-insensitive search over module, activity, PIC and technical detail
    #[arg(short, long, default_value = "")]
    search: String,

    /// Exact status to show, or "all"
    #[arg(long, default_value = "all")]
    status: String,
}

impl Default for FilterArgs {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: logbook_protocol::STATUS_ALL.to_string(),
        }
    }
}

/// Entry fields. Omitted fields keep their current value on edit.
#[derive(Args, Debug, Clone, Default)]
struct EntryArgs {
    /// Activity date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    /// Module or feature
    #[arg(long)]
    module: Option<String>,

    /// What was done
    #[arg(long)]
    activity: Option<String>,

    /// Technical detail
    #[arg(long)]
    detail: Option<String>,

    /// Obstacle encountered
    #[arg(long)]
    obstacle: Option<String>,

    /// How the obstacle was resolved
    #[arg(long)]
    resolution: Option<String>,

    /// Status (Open, On Progress, Done, Canceled, or any other text)
    #[arg(long)]
    status: Option<String>,

    /// Person in charge
    #[arg(long)]
    pic: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show one page of entries
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Entries per page
        #[arg(long, default_value = "10")]
        per_page: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show one entry in detail
    Show {
        /// Entry number
        no: i64,
    },

    /// Create an entry
    Add {
        #[command(flatten)]
        fields: EntryArgs,
    },

    /// Change fields of an entry
    Edit {
        /// Entry number
        no: i64,

        #[command(flatten)]
        fields: EntryArgs,
    },

    /// Remove an entry
    Delete {
        /// Entry number
        no: i64,

        /// Delete without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Write the filtered entries to a CSV file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// List the status values in use
    Statuses {
        /// Print the standard statuses instead
        #[arg(short, long)]
        known: bool,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    logbook_protocol::parse_date(value).ok_or_else(|| format!("invalid date: {value}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::List {
            filter,
            page,
            per_page,
            format,
        } => {
            let session = commands::open(&cli.data, per_page)?;
            commands::list::run(&session, &filter, page, &format, &mut stdout)?;
        }
        Commands::Show { no } => {
            let session = commands::open(&cli.data, commands::DEFAULT_PER_PAGE)?;
            commands::show::run(&session, no.into(), &mut stdout)?;
        }
        Commands::Add { fields } => {
            let session = commands::open(&cli.data, commands::DEFAULT_PER_PAGE)?;
            commands::add::run(&session, &fields)?;
        }
        Commands::Edit { no, fields } => {
            let session = commands::open(&cli.data, commands::DEFAULT_PER_PAGE)?;
            commands::edit::run(&session, no.into(), &fields)?;
        }
        Commands::Delete { no, yes } => {
            let session = commands::open(&cli.data, commands::DEFAULT_PER_PAGE)?;
            commands::delete::run(&session, no.into(), yes, &mut stdout)?;
        }
        Commands::Export { filter, out } => {
            let session = commands::open(&cli.data, commands::DEFAULT_PER_PAGE)?;
            commands::export::run(&session, &filter, &out, &mut stdout)?;
        }
        Commands::Statuses { known } => {
            let session = commands::open(&cli.data, commands::DEFAULT_PER_PAGE)?;
            commands::statuses::run(&session, known, &mut stdout)?;
        }
    }

    Ok(())
}
