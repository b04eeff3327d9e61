//! gradepoint CLI: record courses and track a cumulative GPA.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradepoint", version, about = "Course records and CGPA calculator")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recorded courses with the current CGPA
    List,

    /// Add a new course
    Add {
        /// Course name
        #[arg(long)]
        name: String,

        /// Credit hours (1-6)
        #[arg(long)]
        credits: String,

        /// Letter grade (A, A-, B+, B, B-, C+, C, C-, D+, D, F)
        #[arg(long)]
        grade: String,
    },

    /// Replace name, credit hours and grade of an existing course
    Edit {
        /// Id of the course to edit
        id: String,

        /// Course name
        #[arg(long)]
        name: String,

        /// Credit hours (1-6)
        #[arg(long)]
        credits: String,

        /// Letter grade
        #[arg(long)]
        grade: String,
    },

    /// Delete one course
    Remove {
        /// Id of the course to delete
        id: String,
    },

    /// Delete every course
    Clear {
        /// Confirm permanent deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show CGPA, total credits and course count
    Summary {
        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the 4.0 grade scale
    Scale,

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::List => commands::list::execute(config).await,
        Commands::Add {
            name,
            credits,
            grade,
        } => commands::save::add(config, name, credits, grade).await,
        Commands::Edit {
            id,
            name,
            credits,
            grade,
        } => commands::save::edit(config, id, name, credits, grade).await,
        Commands::Remove { id } => commands::remove::execute(config, id).await,
        Commands::Clear { yes } => commands::clear::execute(config, yes).await,
        Commands::Summary { format, output } => {
            commands::summary::execute(config, format, output).await
        }
        Commands::Scale => commands::scale::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
