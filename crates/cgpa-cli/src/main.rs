//! cgpa CLI: the user-facing GPA/CGPA calculator.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::export::ExportFormat;
use commands::show::ShowFormat;
use commands::Globals;

#[derive(Parser)]
#[command(name = "cgpa", version, about = "GPA and CGPA calculator")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding saved session data
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a course and print the updated GPA
    AddCourse {
        /// Course name (e.g. "CSE220")
        #[arg(long)]
        name: String,

        /// Letter grade (e.g. "A-")
        #[arg(long)]
        grade: String,

        /// Credit hours
        #[arg(long, allow_hyphen_values = true)]
        credit: String,

        /// Grading system id (e.g. NSU); defaults to the configured one
        #[arg(long)]
        system: Option<String>,
    },

    /// File a semester against the current GPA and print the updated CGPA
    ///
    /// Each invocation starts from an empty semester list, so the result
    /// replaces any saved CGPA. Use `cgpa shell` to file several semesters
    /// into one CGPA.
    AddSemester {
        /// GPA of the previous semester
        #[arg(long, allow_hyphen_values = true)]
        previous: String,
    },

    /// Show recorded courses, GPA and CGPA
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ShowFormat,
    },

    /// Remove all courses and results
    Clear,

    /// List grading systems, or one system's grade scale
    Systems {
        /// Grading system id
        #[arg(long)]
        system: Option<String>,
    },

    /// Write a transcript of the current session
    Export {
        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Interactive session reading commands from stdin
    Shell {
        /// Grading system id to start with
        #[arg(long)]
        system: Option<String>,
    },

    /// Create a starter cgpa.toml
    Init {
        /// Default grading system to record
        #[arg(long)]
        system: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let globals = Globals {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::AddCourse {
            name,
            grade,
            credit,
            system,
        } => commands::add_course::execute(&globals, name, grade, credit, system).await,
        Commands::AddSemester { previous } => {
            commands::add_semester::execute(&globals, previous).await
        }
        Commands::Show { format } => commands::show::execute(&globals, format).await,
        Commands::Clear => commands::clear::execute(&globals).await,
        Commands::Systems { system } => commands::systems::execute(system),
        Commands::Export { output, format } => {
            commands::export::execute(&globals, output, format).await
        }
        Commands::Shell { system } => commands::shell::execute(&globals, system).await,
        Commands::Init { system } => commands::init::execute(system, globals.data_dir),
    };

    if let Err(e) = result {
        match commands::validation_message(&e) {
            Some(msg) => eprintln!("Invalid input: {msg}"),
            None => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}
