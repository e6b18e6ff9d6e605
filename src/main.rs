//! tack CLI - thin shell over the version-control engine

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use tack::ops::{add, checkout, commit, fsck, log};
use tack::{Repo, Staging};

#[derive(Parser)]
#[command(name = "tack")]
#[command(about = "minimal single-branch version control")]
#[command(version)]
struct Cli {
    /// repository path
    #[arg(short, long, default_value = ".", env = "TACK_REPO")]
    repo: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a new repository
    Init {
        /// path to create repository at
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// stage a file for the next commit
    Add {
        /// file to stage
        file: PathBuf,
    },

    /// commit the staged files
    Commit {
        /// commit message
        #[arg(short, long)]
        message: String,
    },

    /// list staged files
    Status,

    /// show commit history
    Log,

    /// restore the files of a commit by index
    Checkout {
        /// commit index
        index: u64,

        /// destination directory
        #[arg(short, long, default_value = ".")]
        destination: PathBuf,
    },

    /// verify repository integrity
    Fsck,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> tack::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            Repo::init(&path)?;
            println!("initialized tack repository at {}", path.display());
        }

        Commands::Add { file } => {
            let repo = Repo::open(&cli.repo)?;
            let hash = add(&repo, &file)?;
            println!("staged {} ({})", file.display(), hash.short_hex());
        }

        Commands::Commit { message } => {
            let repo = Repo::open(&cli.repo)?;
            let record = commit(&repo, &message)?;
            println!("committed {} files as commit {}", record.len(), record.index);
        }

        Commands::Status => {
            let repo = Repo::open(&cli.repo)?;
            let staging = Staging::load(&repo)?;

            if staging.is_empty() {
                println!("nothing staged");
            } else {
                for (name, hash) in staging.current() {
                    println!("{}  {}", hash.short_hex(), name);
                }
            }
        }

        Commands::Log => {
            let repo = Repo::open(&cli.repo)?;
            let entries = log(&repo)?;

            for entry in entries {
                println!("{}", entry);
            }
        }

        Commands::Checkout { index, destination } => {
            let repo = Repo::open(&cli.repo)?;
            let restored = checkout(&repo, index, &destination)?;
            println!(
                "restored {} files from commit {} into {}",
                restored.len(),
                index,
                destination.display()
            );
        }

        Commands::Fsck => {
            let repo = Repo::open(&cli.repo)?;
            let report = fsck(&repo)?;

            println!(
                "checked {} commits, {} blobs",
                report.commits_checked, report.blobs_checked
            );
            for missing in &report.missing_blobs {
                println!("missing: {} ({})", missing.hash, missing.referenced_by);
            }
            for corrupt in &report.corrupt_blobs {
                println!("corrupt: {}", corrupt);
            }
            for dangling in &report.dangling_objects {
                println!("dangling: {}", dangling);
            }

            if !report.is_ok() {
                return Err(tack::Error::CorruptRepo(format!(
                    "{} missing, {} corrupt",
                    report.missing_blobs.len(),
                    report.corrupt_blobs.len()
                )));
            }
        }
    }

    Ok(())
}
