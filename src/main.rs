mod commands;
mod context;
mod parse;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use context::AppContext;

#[derive(Parser)]
#[command(name = "minical")]
#[command(about = "A month calendar for the terminal with local events and iCalendar export")]
struct Cli {
    /// Print debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// First day of the week (e.g. "monday"); overrides week_start in config.toml
    #[arg(long, global = true)]
    week_start: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid with its events (default: current month)
    Month {
        #[arg(short, long)]
        year: Option<i32>,

        /// Month number, 1-12
        #[arg(short, long)]
        month: Option<u32>,

        /// Show the month after the selected one
        #[arg(long, conflicts_with = "prev")]
        next: bool,

        /// Show the month before the selected one
        #[arg(long)]
        prev: bool,
    },
    /// List the events of one day
    Day {
        /// YYYY-MM-DD, "today" or "tomorrow" (default: today)
        date: Option<String>,
    },
    /// List all events
    List {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an event (prompts for anything missing when no title is given)
    Add {
        title: Option<String>,

        /// Start date/time (e.g., "2025-03-20" or "2025-03-20T15:00"); defaults to now
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an event by id or id prefix (prompts when no field is given)
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        /// New description; pass "" to clear it
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove an event by id or id prefix
    Remove { id: String },
    /// Export all events to an .ics file
    Export {
        /// Output file (default: events.ics)
        path: Option<PathBuf>,

        /// Escape and fold values per RFC 5545, with CRLF line endings
        #[arg(long)]
        strict: bool,
    },
    /// Show or set the theme (light, dark or system)
    Theme { theme: Option<String> },
    /// Show config and data paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut ctx = AppContext::load(cli.week_start.as_deref())?;

    match cli.command.unwrap_or(Commands::Month {
        year: None,
        month: None,
        next: false,
        prev: false,
    }) {
        Commands::Month {
            year,
            month,
            next,
            prev,
        } => commands::month::run(
            &ctx,
            commands::month::MonthArgs {
                year,
                month,
                next,
                prev,
            },
        ),
        Commands::Day { date } => commands::day::run(&ctx, date),
        Commands::List { json } => commands::list::run(&ctx, json),
        Commands::Add {
            title,
            date,
            description,
        } => commands::add::run(&mut ctx, title, date, description),
        Commands::Edit {
            id,
            title,
            date,
            description,
        } => commands::edit::run(&mut ctx, &id, title, date, description),
        Commands::Remove { id } => commands::remove::run(&mut ctx, &id),
        Commands::Export { path, strict } => commands::export::run(&ctx, path, strict),
        Commands::Theme { theme } => commands::theme::run(&mut ctx, theme),
        Commands::Config => commands::config::run(&ctx),
    }
}
