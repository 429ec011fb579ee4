//! Fold Tetris runner (default binary).
//!
//! `fold-tetris [play]` runs an interactive session on the terminal keyboard and
//! draws the board on the alternate screen;
//! `fold-tetris replay --script ...` folds a scripted input list headless and
//! prints the summary as JSON.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};
use tokio::sync::mpsc;

use fold_tetris::engine::{
    init_file_logger, parse_args, replay, run_session, Command, NullSink, Script, SessionConfig,
    SessionSummary,
};
use fold_tetris::input::{should_quit, InputHandler};
use fold_tetris::types::Action;

mod view;

use view::BoardView;

const INPUT_POLL_MS: u64 = 50;
const INPUT_QUEUE: usize = 64;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = SessionConfig::from_env();
    let command = parse_args(&args, &mut config)?;
    let _logger = init_file_logger(&config.log_path, config.log_level)?;

    let summary = match command {
        Command::Replay { script } => {
            let script: Script = script.parse()?;
            let (summary, _) = replay(config.seed, &script, config.replay_ticks(), &mut NullSink)?;
            summary
        }
        Command::Play => play(&config)?,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn play(config: &SessionConfig) -> Result<SessionSummary> {
    let runtime = tokio::runtime::Runtime::new()?;
    let (tx, rx) = mpsc::channel(INPUT_QUEUE);

    let mut board = BoardView::new();
    board.enter()?;

    let reader = thread::spawn(move || read_input(tx));
    let result = runtime.block_on(run_session(config, rx, &mut board));

    // Always try to restore terminal state.
    let _ = board.exit();

    match reader.join() {
        Ok(Err(err)) => warn!("input reader failed: {:#}", err),
        Err(_) => warn!("input reader panicked"),
        Ok(Ok(())) => {}
    }
    result
}

/// Forward key presses until quit, or until the session stops listening.
///
/// Returning drops `tx`, which ends the session.
fn read_input(tx: mpsc::Sender<Action>) -> Result<()> {
    let start = Instant::now();
    let mut handler = InputHandler::new();

    while !tx.is_closed() {
        if !event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Press && should_quit(key) {
            info!("quit requested");
            return Ok(());
        }

        let now_ms = start.elapsed().as_millis() as u64;
        if let Some(action) = handler.handle_event(key, now_ms) {
            tx.blocking_send(action)
                .map_err(|_| anyhow!("session stopped"))?;
        }
    }
    Ok(())
}
