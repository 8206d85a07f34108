//! `ymtool`: inspect, fingerprint and retag YM chiptune files.
//!
//! Exit codes: 1 for command-line errors, 2 for I/O or malformed files,
//! 3 for YM versions the codec does not support.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgGroup, CommandFactory, FromArgMatches, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ymtool::ym_parser::YmVersion;
use ymtool::{load_file, save_file, DecodeOptions, MetadataEdit, YmError};

const EXIT_CMD_PARSING: u8 = 1;
const EXIT_IO_ERROR: u8 = 2;
const EXIT_UNSUPPORTED_VERSION: u8 = 3;

#[derive(Parser)]
#[command(name = "ymtool", version)]
#[command(about = "Inspect and edit YM chiptune files")]
struct Args {
    /// Log decoding details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the metadata of a YM file
    Info {
        /// Require the trailing "End!" marker
        #[arg(long)]
        strict: bool,

        /// Print the header as JSON
        #[arg(long)]
        json: bool,

        /// YM file
        file: PathBuf,
    },

    /// Hash the register data of YM files, ignoring metadata.
    /// Useful to find duplicate songs that carry different metadata.
    Digest {
        /// Require the trailing "End!" marker
        #[arg(long)]
        strict: bool,

        /// YM files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Update the metadata of a YM file
    #[command(group(
        ArgGroup::new("fields")
            .required(true)
            .multiple(true)
            .args(["song_name", "author", "comment"])
    ))]
    Update {
        /// Name of the song
        #[arg(long)]
        song_name: Option<String>,

        /// Song author
        #[arg(long)]
        author: Option<String>,

        /// Song comment
        #[arg(long)]
        comment: Option<String>,

        /// Write to this path instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YM file
        file: PathBuf,
    },
}

fn after_help() -> String {
    let versions: Vec<&str> = YmVersion::supported().map(YmVersion::as_str).collect();
    format!(
        "Supported YM versions: {}\n\n\
         Exit codes:\n  \
         {EXIT_CMD_PARSING}: Error parsing command line.\n  \
         {EXIT_IO_ERROR}: I/O error reading or writing files.\n  \
         {EXIT_UNSUPPORTED_VERSION}: Unsupported YM version.\n\n\
         WARNING: LHA/LZH compressed YM files are not unpacked.\n\
         The YM file is expected to be already unpacked.",
        versions.join(" ")
    )
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Info { strict, json, file } => {
            let ym = load_file(&file, DecodeOptions { strict })
                .with_context(|| format!("error opening file {}", file.display()))?;
            let header = ym.header();
            if json {
                println!("{}", serde_json::to_string_pretty(&header.summary())?);
            } else {
                println!("Information for {}:\n", file.display());
                print!("{header}");
                if let Some(secs) = header.duration_secs() {
                    println!(
                        "Duration        : {}:{:05.2}",
                        (secs / 60.0).floor(),
                        secs % 60.0
                    );
                }
            }
        }
        Command::Digest { strict, files } => {
            for file in files {
                let ym = load_file(&file, DecodeOptions { strict })
                    .with_context(|| format!("error opening file {}", file.display()))?;
                println!("{}\t{}", ym.frame_digest(), file.display());
            }
        }
        Command::Update {
            song_name,
            author,
            comment,
            output,
            file,
        } => {
            let mut ym = load_file(&file, DecodeOptions::lenient())
                .with_context(|| format!("error opening file {}", file.display()))?;
            ym.set_metadata(MetadataEdit {
                song_name,
                author,
                comment,
            });

            let target = output.unwrap_or(file);
            save_file(&target, &ym)
                .with_context(|| format!("error writing file {}", target.display()))?;
            info!(path = %target.display(), "updated metadata");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cmd = Args::command().after_help(after_help());
    let args = match cmd
        .try_get_matches()
        .and_then(|matches| Args::from_arg_matches(&matches))
    {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_CMD_PARSING } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let unsupported = err
                .downcast_ref::<YmError>()
                .is_some_and(YmError::is_unsupported_version);
            ExitCode::from(if unsupported {
                EXIT_UNSUPPORTED_VERSION
            } else {
                EXIT_IO_ERROR
            })
        }
    }
}
