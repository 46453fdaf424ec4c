//! graphicalang command-line host.
//!
//! Provides the `graphicalang` binary: edit a stored program one block at a
//! time, print it, and replay it with real-time pacing. Programs live in a
//! SQLite database, one JSON blob per storage key.
//!
//! Exit codes: 0 = success, 1 = usage or model error, 3 = storage or I/O
//! error.

mod demo;
mod edit;
mod error;
mod pretty;
mod render;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use graphicalang_core::{ExprId, Program, StatId, StatListId};
use graphicalang_eval::{CancelToken, DriveOutcome, Driver, DriverConfig, SleepPacer};
use graphicalang_storage::{from_blob, to_blob_pretty, ProgramStore, SqliteStore, StorageKey};

use crate::edit::NewSlots;
use crate::error::CliError;
use crate::render::{Format, TerminalRenderer};

/// Build block programs and watch them run.
#[derive(Parser)]
#[command(name = "graphicalang", about = "Build block programs and watch them run")]
struct Cli {
    /// Path to the program database file.
    #[arg(long, env = "GRAPHICALANG_DB_PATH", default_value = "graphicalang.db")]
    db: String,

    /// Key the program is stored under.
    #[arg(long, env = "GRAPHICALANG_STORAGE_KEY", default_value = StorageKey::DEFAULT)]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Replace the stored program with an empty one.
    New,

    /// Print the program as a statement tree.
    Show {
        /// Print the raw JSON blob instead.
        #[arg(long)]
        json: bool,
    },

    /// Store a program read from a JSON file.
    Import { file: PathBuf },

    /// Write the stored program to a JSON file.
    Export { file: PathBuf },

    /// List stored programs.
    List,

    /// Delete the stored program.
    Delete,

    /// Append a new statement (assign, if, while, sleep) to a list.
    AddStat {
        #[arg(long, default_value = StatListId::ENTRY)]
        list: String,

        #[arg(long)]
        kind: String,
    },

    /// Put a new expression into a slot.
    SetExpr {
        #[arg(long)]
        id: String,

        #[arg(long)]
        kind: String,

        /// Value for `const`.
        #[arg(long, allow_hyphen_values = true)]
        value: Option<f64>,

        /// Variable name for `var`.
        #[arg(long)]
        name: Option<String>,
    },

    /// Turn an expression slot back into a hole.
    UnsetExpr {
        #[arg(long)]
        id: String,
    },

    /// Change the variable an assignment writes.
    Rename {
        #[arg(long)]
        stat: String,

        #[arg(long)]
        name: String,
    },

    /// Remove the statement at an index from a list.
    Remove {
        #[arg(long, default_value = StatListId::ENTRY)]
        list: String,

        #[arg(long)]
        index: usize,
    },

    /// Replace the stored program with a sample one.
    Demo,

    /// Replay the program, one line per step. Ctrl-C stops it.
    Run {
        /// Emit JSON lines instead of text.
        #[arg(long)]
        json: bool,

        /// Milliseconds per sleep unit.
        #[arg(long, default_value_t = 1.0)]
        time_unit_ms: f64,

        /// Stop after this many steps.
        #[arg(long)]
        max_steps: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let exit_code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

async fn execute(cli: Cli) -> Result<(), CliError> {
    let mut store = SqliteStore::new(&cli.db)?;
    let key = StorageKey::new(cli.key);

    match cli.command {
        Commands::New => {
            store.save(&key, &Program::new())?;
            println!("created empty program under {}", key);
        }
        Commands::Show { json } => {
            let program = store.load_or_empty(&key)?;
            if json {
                println!("{}", to_blob_pretty(&program)?);
            } else {
                print!("{}", pretty::format_program(&program));
            }
        }
        Commands::Import { file } => {
            let blob = std::fs::read_to_string(&file)?;
            let program = from_blob(&blob)?;
            store.save(&key, &program)?;
            tracing::info!(file = %file.display(), %key, "program imported");
        }
        Commands::Export { file } => {
            let program = store.load_existing(&key)?;
            std::fs::write(&file, to_blob_pretty(&program)?)?;
            tracing::info!(file = %file.display(), %key, "program exported");
        }
        Commands::List => {
            for summary in store.list()? {
                println!(
                    "{}\t{}\t{} bytes",
                    summary.key,
                    &summary.content_hash[..12.min(summary.content_hash.len())],
                    summary.size_bytes
                );
            }
        }
        Commands::Delete => {
            store.delete(&key)?;
            println!("deleted {}", key);
        }
        Commands::AddStat { list, kind } => {
            let mut program = store.load_or_empty(&key)?;
            let (id, slots) = edit::add_stat(&mut program, &StatListId::from(list), &kind)?;
            store.save(&key, &program)?;
            println!("stat {}", id);
            print_slots(&slots);
        }
        Commands::SetExpr {
            id,
            kind,
            value,
            name,
        } => {
            let mut program = store.load_or_empty(&key)?;
            let slots = edit::set_expr(&mut program, ExprId::from(id), &kind, value, name)?;
            store.save(&key, &program)?;
            print_slots(&slots);
        }
        Commands::UnsetExpr { id } => {
            let mut program = store.load_or_empty(&key)?;
            edit::unset_expr(&mut program, ExprId::from(id));
            store.save(&key, &program)?;
        }
        Commands::Rename { stat, name } => {
            let mut program = store.load_or_empty(&key)?;
            edit::rename(&mut program, &StatId::from(stat), name)?;
            store.save(&key, &program)?;
        }
        Commands::Remove { list, index } => {
            let mut program = store.load_or_empty(&key)?;
            let removed = edit::remove(&mut program, &StatListId::from(list), index)?;
            store.save(&key, &program)?;
            println!("removed stat {}", removed);
        }
        Commands::Demo => {
            store.save(&key, &demo::demo_program())?;
            println!("stored demo program under {}", key);
        }
        Commands::Run {
            json,
            time_unit_ms,
            max_steps,
        } => {
            let program = store.load_or_empty(&key)?;
            let format = if json { Format::Json } else { Format::Text };
            let config = DriverConfig {
                time_unit: time_unit(time_unit_ms),
                max_steps,
            };
            let outcome = run_program(program, config, format).await?;
            eprintln!("{}", describe(&outcome));
        }
    }

    Ok(())
}

/// Drives `program` on a blocking task, cancelling it on Ctrl-C.
async fn run_program(
    program: Program,
    config: DriverConfig,
    format: Format,
) -> Result<DriveOutcome, CliError> {
    let cancel = CancelToken::new();
    let driver = Driver::new(config, cancel.clone());
    let renderer_cancel = cancel.clone();

    let mut task = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout().lock();
        let mut renderer = TerminalRenderer::new(stdout, format, renderer_cancel);
        driver.drive(
            graphicalang_eval::run(&program),
            &mut renderer,
            &mut SleepPacer::default(),
        )
    });

    let outcome = tokio::select! {
        outcome = &mut task => outcome?,
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => {
                    tracing::info!("interrupted, stopping run");
                    cancel.cancel();
                }
                Err(e) => tracing::warn!(error = %e, "cannot listen for Ctrl-C"),
            }
            task.await?
        }
    };
    Ok(outcome)
}

/// Converts the `--time-unit-ms` flag; negative or NaN means no pacing.
fn time_unit(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}

fn describe(outcome: &DriveOutcome) -> String {
    match outcome {
        DriveOutcome::Completed { rendered } => format!("finished after {} steps", rendered),
        DriveOutcome::Cancelled { rendered } => format!("stopped after {} steps", rendered),
        DriveOutcome::StepLimitReached { rendered } => {
            format!("step limit reached after {} steps", rendered)
        }
    }
}

fn print_slots(slots: &NewSlots) {
    for id in &slots.exprs {
        println!("expr slot {}", id);
    }
    for id in &slots.lists {
        println!("list {}", id);
    }
}
