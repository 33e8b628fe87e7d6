mod commands;
mod context;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use context::AppContext;

#[derive(Parser)]
#[command(name = "meditation-calendar", version)]
#[command(about = "Schedule meditation sittings and keep a practice log")]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database, overriding the configured one
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage event templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// List upcoming occurrences
    Upcoming {
        /// Days to look ahead (defaults to the configured window)
        #[arg(long)]
        days: Option<i64>,

        /// Include private templates created by this user
        #[arg(long)]
        viewer: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show one occurrence by its occurrence id
    Show {
        occurrence_id: String,

        #[arg(long)]
        json: bool,
    },

    /// Export one occurrence as iCalendar text
    Export {
        occurrence_id: String,

        /// Write to this .ics file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Practice log and timer
    #[command(subcommand)]
    Practice(PracticeCommand),

    /// Inspect or create the settings file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum TemplateCommand {
    Add {
        #[arg(long)]
        title: String,

        /// Start of the first sitting (RFC 3339, e.g. "2024-01-01T06:00:00Z")
        #[arg(long)]
        start: String,

        /// Minutes (defaults to the configured duration)
        #[arg(long)]
        duration: Option<i64>,

        /// none, daily, weekly or monthly
        #[arg(long, default_value = "none")]
        recurrence: String,

        #[arg(long)]
        tradition: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Only visible to --creator
        #[arg(long, requires = "creator")]
        private: bool,

        #[arg(long)]
        creator: Option<String>,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum PracticeCommand {
    /// Record a sitting done without the timer
    Log {
        #[arg(long)]
        minutes: i64,

        /// RFC 3339 start time (defaults to now minus the duration)
        #[arg(long)]
        started: Option<String>,

        #[arg(long)]
        template: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Run the meditation timer and record the sitting
    Sit {
        /// Minutes (defaults to the configured duration)
        #[arg(long)]
        minutes: Option<i64>,

        #[arg(long)]
        template: Option<String>,
    },
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long)]
        json: bool,
    },
    Stats {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
    /// Write a settings file with the default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    // Config commands must work even when the current file is broken.
    if let Commands::Config(command) = &cli.command {
        return match command {
            ConfigCommand::Show => commands::config::show(cli.config.as_deref()),
            ConfigCommand::Init { force } => commands::config::init(cli.config.as_deref(), *force),
        };
    }

    let ctx = AppContext::load(cli.config.as_deref(), cli.database)?;

    match cli.command {
        Commands::Template(command) => match command {
            TemplateCommand::Add {
                title,
                start,
                duration,
                recurrence,
                tradition,
                description,
                private,
                creator,
            } => commands::template::add(
                &ctx,
                commands::template::NewTemplate {
                    title,
                    start,
                    duration,
                    recurrence,
                    tradition,
                    description,
                    private,
                    creator,
                },
            ),
            TemplateCommand::List { json } => commands::template::list(&ctx, json),
            TemplateCommand::Delete { id } => commands::template::delete(&ctx, &id),
        },
        Commands::Upcoming { days, viewer, json } => {
            commands::upcoming::run(&ctx, days, viewer.as_deref(), json)
        }
        Commands::Show { occurrence_id, json } => commands::show::run(&ctx, &occurrence_id, json),
        Commands::Export {
            occurrence_id,
            output,
        } => commands::export::run(&ctx, &occurrence_id, output.as_deref()),
        Commands::Practice(command) => match command {
            PracticeCommand::Log {
                minutes,
                started,
                template,
                notes,
            } => commands::practice::log(&ctx, minutes, started.as_deref(), template, notes),
            PracticeCommand::Sit { minutes, template } => {
                commands::practice::sit(&ctx, minutes, template)
            }
            PracticeCommand::History { limit, json } => {
                commands::practice::history(&ctx, limit, json)
            }
            PracticeCommand::Stats { json } => commands::practice::stats(&ctx, json),
        },
        Commands::Config(_) => Ok(()), // handled above
    }
}
