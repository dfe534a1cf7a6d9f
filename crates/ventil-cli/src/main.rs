mod commands;
mod logging;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use logging::{LogConfig, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ventil",
    version,
    about = "Diagnose HVAC trend logs against threshold profiles"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which sensor role each column header was classified into
    Columns {
        /// Trend log files (CSV, TXT, XLSX, XLS, ODS)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Analyze trend logs and print findings, comfort results and actions
    Analyze {
        /// Trend log files; several files are combined into one table
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Predefined threshold profile: standard, strict
        #[arg(short, long, value_name = "NAME", default_value = "standard")]
        preset: String,

        /// Custom JSON threshold profile (overrides --preset)
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Append the diagnostic reference for the problem areas found
        #[arg(long)]
        reference: bool,

        /// Show explanation and suggestions under each finding
        #[arg(long)]
        details: bool,
    },
    /// Inspect and validate threshold profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Print every threshold of a profile
    Explain {
        /// Preset name (e.g., "strict")
        preset: String,
    },
    /// Print the JSON profile format with an example
    Schema,
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format);
    if let Err(e) = logging::init_logging(&config) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let result = match cli.command {
        Commands::Columns { files, output } => commands::columns::run(&files, &output),
        Commands::Analyze {
            files,
            preset,
            profile,
            output,
            reference,
            details,
        } => commands::analyze::run(
            &files,
            &preset,
            profile.as_deref(),
            &output,
            reference,
            details,
        ),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Explain { preset } => commands::profiles::explain(&preset),
            ProfilesAction::Schema => commands::profiles::schema(),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
