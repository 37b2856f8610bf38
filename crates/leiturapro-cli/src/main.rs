//! leiturapro CLI: a terminal view over one classroom session.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "leiturapro",
    version,
    about = "Classroom literacy and math progress tracker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard summary
    Dashboard {
        /// Roster TOML file (defaults to the built-in sample)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List classes with their student counts
    Classes {
        /// Roster TOML file (defaults to the built-in sample)
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// List students
    Students {
        /// Roster TOML file (defaults to the built-in sample)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Only students of this class (name or id)
        #[arg(long)]
        class: Option<String>,

        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one student's assessment history
    History {
        /// Student name or id
        #[arg(long)]
        student: String,

        /// Roster TOML file (defaults to the built-in sample)
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// Ask the AI advisor for a pedagogical analysis of a student
    Analyze {
        /// Student name or id
        #[arg(long)]
        student: String,

        /// Roster TOML file (defaults to the built-in sample)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate a reading passage with comprehension questions
    Passage {
        /// Grade level, e.g. "2º Ano Fundamental"
        #[arg(long)]
        grade: String,

        /// Topic of the passage
        #[arg(long)]
        topic: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a roster TOML file
    Validate {
        /// Path to the roster file
        #[arg(long)]
        roster: PathBuf,
    },

    /// Create a starter config and roster
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("leiturapro=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dashboard { roster, format } => commands::dashboard::execute(roster, format),
        Commands::Classes { roster } => commands::classes::execute(roster),
        Commands::Students {
            roster,
            class,
            search,
        } => commands::students::execute(roster, class, search),
        Commands::History { student, roster } => commands::history::execute(student, roster),
        Commands::Analyze {
            student,
            roster,
            config,
        } => commands::analyze::execute(student, roster, config).await,
        Commands::Passage {
            grade,
            topic,
            config,
        } => commands::passage::execute(grade, topic, config).await,
        Commands::Validate { roster } => commands::validate::execute(roster),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
