//! Headless board dump.
//!
//! # Responsibility
//! - Open a board database outside the desktop shell and print its lanes.
//! - Verify `kanban_core` wiring without the Flutter/FFI runtime.
//!
//! Usage: `kanban_cli [--json] [DB_PATH]`. Without `DB_PATH` the path comes
//! from `KANBAN_DB_PATH` or the temp-dir default.

use clap::Parser;
use kanban_core::{
    init_logging_from_config, BoardConfig, BoardService, BoardSnapshot, Database,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kanban_cli", about = "Print a kanban board database", version)]
struct Cli {
    /// Output the board as JSON
    #[arg(long)]
    json: bool,

    /// Board database file (defaults to KANBAN_DB_PATH or the temp dir)
    db_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("kanban_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = BoardConfig::from_env();
    if let Some(path) = cli.db_path {
        config = config.with_db_path(path);
    }
    init_logging_from_config(&config)?;

    let database = Database::open(&config.db_path).map_err(|err| err.to_string())?;
    let board = BoardService::open(database).map_err(|err| err.to_string())?;
    let snapshot = board.snapshot();
    log::info!(
        "event=cli_dump module=cli status=ok lanes={} orphaned={}",
        snapshot.lanes.len(),
        snapshot.orphaned.len()
    );

    if cli.json {
        let text = serde_json::to_string_pretty(&snapshot).map_err(|err| err.to_string())?;
        println!("{text}");
    } else {
        print_board(&config, &snapshot);
    }

    board
        .into_gateway()
        .close()
        .map_err(|err| err.to_string())
}

fn print_board(config: &BoardConfig, snapshot: &BoardSnapshot) {
    println!("board {}", config.db_path.display());
    for lane in &snapshot.lanes {
        println!("[{}] {} ({})", lane.column.id, lane.column.title, lane.tasks.len());
        for task in &lane.tasks {
            let marker = if task.is_completed() { "x" } else { " " };
            println!("  [{marker}] {} {}", task.id, task.title);
        }
    }
    if !snapshot.orphaned.is_empty() {
        println!("tasks without a column: {}", snapshot.orphaned.len());
    }
}
