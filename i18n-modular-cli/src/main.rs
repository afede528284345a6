use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use i18n_modular::{Error, PartialOptions, build, clean, config, update};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory module files are searched under
    #[arg(long, global = true)]
    keys_root: Option<PathBuf>,

    /// Filename suffix identifying module files
    #[arg(long, global = true)]
    module_ending: Option<String>,

    /// Dictionary directory or path template containing [locale_code]
    #[arg(long, global = true)]
    dictionary_pattern: Option<PathBuf>,

    /// Explicit rc file to read instead of the discovered one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rebuild every language's dictionary from the module files.
    Build,
    /// Push dictionary edits back into the module files.
    Update,
    /// Strip generated entries from the dictionaries, keeping seed keys.
    Clean,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, Error> {
    let context = config::context_dir();
    let rc_path = args
        .config
        .clone()
        .unwrap_or_else(|| context.join(config::RC_FILE_NAME));

    let flags = PartialOptions {
        keys_root: args.keys_root.clone(),
        module_ending: args.module_ending.clone(),
        dictionary_pattern: args.dictionary_pattern.clone(),
    };
    let options = flags
        .or(PartialOptions::from_rc_file(&rc_path)?)
        .resolve(&context)?;

    let (name, started) = match args.command {
        Commands::Build => {
            let report = build(&options)?;
            ("build", report.started)
        }
        Commands::Update => {
            let report = update(&options)?;
            for id in &report.skipped {
                eprintln!("Skipped {id}: module file no longer exists");
            }
            ("update", report.started)
        }
        Commands::Clean => {
            let report = clean(&options)?;
            ("clean", report.started)
        }
    };

    Ok(format!("Completed \"{name}\" in {}s", elapsed(started)))
}

fn elapsed(started: Instant) -> String {
    format!("{:.2}", started.elapsed().as_secs_f64())
}
