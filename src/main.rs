//! gitlite CLI - git-compatible object store command line interface

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitlite::ops::{
    cat_file, commit_tree, hash_file, hash_object, ls_tree_entries, ls_tree_recursive, pretty_print,
    write_tree, SystemClock,
};
use gitlite::{IoResultExt, ObjectId, Repo};

#[derive(Parser)]
#[command(name = "gitlite")]
#[command(about = "git-compatible loose object store")]
#[command(version)]
struct Cli {
    /// work tree path
    #[arg(short = 'C', long, global = true, default_value = ".")]
    repo: PathBuf,

    /// increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a new repository
    Init {
        /// path to create repository at (defaults to --repo)
        path: Option<PathBuf>,
    },

    /// compute the blob id of a file
    HashObject {
        /// store the blob in the object database
        #[arg(short, long)]
        write: bool,

        /// file to hash
        file: PathBuf,
    },

    /// show an object's content, kind or size
    CatFile {
        #[command(flatten)]
        mode: CatFileMode,

        /// object id
        id: String,
    },

    /// list tree contents
    LsTree {
        /// only print entry names
        #[arg(long)]
        name_only: bool,

        /// list recursively
        #[arg(short, long)]
        recursive: bool,

        /// tree id
        id: String,
    },

    /// store the work tree as a tree object
    WriteTree,

    /// create a commit object for a tree
    CommitTree {
        /// tree id
        tree: String,

        /// parent commit id (repeatable)
        #[arg(short, long = "parent")]
        parents: Vec<String>,

        /// commit message
        #[arg(short, long)]
        message: String,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct CatFileMode {
    /// pretty-print the content
    #[arg(short = 'p')]
    pretty: bool,

    /// print the object kind
    #[arg(short = 't')]
    kind: bool,

    /// print the content size in bytes
    #[arg(short = 's')]
    size: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gitlite={}", level)));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> gitlite::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let path = path.unwrap_or(cli.repo);
            Repo::init(&path)?;
            println!("initialized gitlite repository at {}", path.display());
        }

        Commands::HashObject { write, file } => {
            let id = if write {
                let repo = Repo::open(&cli.repo)?;
                hash_object(repo.store(), &file, true)?
            } else {
                // hashing alone does not need a repository
                hash_file(&file)?
            };
            println!("{}", id);
        }

        Commands::CatFile { mode, id } => {
            let repo = Repo::open(&cli.repo)?;
            let id = ObjectId::from_hex(&id)?;
            let object = cat_file(repo.store(), &id)?;

            if mode.kind {
                println!("{}", object.kind);
            } else if mode.size {
                println!("{}", object.content.len());
            } else {
                let out = pretty_print(&object)?;
                io::stdout().lock().write_all(&out).with_path("stdout")?;
            }
        }

        Commands::LsTree {
            name_only,
            recursive,
            id,
        } => {
            let repo = Repo::open(&cli.repo)?;
            let id = ObjectId::from_hex(&id)?;

            if recursive {
                for entry in ls_tree_recursive(repo.store(), &id)? {
                    if name_only {
                        println!("{}", entry.path);
                    } else {
                        println!("{}", entry);
                    }
                }
            } else {
                for entry in ls_tree_entries(repo.store(), &id)? {
                    if name_only {
                        println!("{}", entry.name);
                    } else {
                        println!("{}", entry);
                    }
                }
            }
        }

        Commands::WriteTree => {
            let repo = Repo::open(&cli.repo)?;
            let id = write_tree(repo.store(), repo.path())?;
            println!("{}", id);
        }

        Commands::CommitTree {
            tree,
            parents,
            message,
        } => {
            let repo = Repo::open(&cli.repo)?;
            let tree = ObjectId::from_hex(&tree)?;
            let parents = parents
                .iter()
                .map(|p| ObjectId::from_hex(p))
                .collect::<gitlite::Result<Vec<_>>>()?;

            let id = commit_tree(
                repo.store(),
                &tree,
                &parents,
                &message,
                repo.identity(),
                &SystemClock,
            )?;
            println!("{}", id);
        }
    }

    Ok(())
}
