//! Session configuration from environment variables and command-line flags.

use anyhow::{anyhow, Result};
use log::LevelFilter;

use crate::types::TICK_RATE_MS;

/// Default log file path
pub const DEFAULT_LOG_PATH: &str = "fold-tetris.log";

/// Ticks a replay runs when no limit is configured
pub const DEFAULT_REPLAY_TICKS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Seeds both the starting state and the tick clock
    pub seed: u32,
    /// Clock period in milliseconds
    pub tick_ms: u64,
    /// Stop after this many clock ticks
    pub max_ticks: Option<u64>,
    pub log_path: String,
    pub log_level: LevelFilter,
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive session driven by the terminal keyboard
    Play,
    /// Headless fold of a scripted input list
    Replay { script: String },
}

fn random_seed() -> u32 {
    use rand::Rng;
    rand::thread_rng().gen_range(1..=10_000)
}

impl SessionConfig {
    /// Read `FOLD_TETRIS_*` variables, falling back to defaults.
    ///
    /// An unset or unparsable seed becomes a random one.
    pub fn from_env() -> Self {
        use std::env;

        let seed = env::var("FOLD_TETRIS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(random_seed);

        let tick_ms = env::var("FOLD_TETRIS_TICK_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(TICK_RATE_MS);

        let max_ticks = env::var("FOLD_TETRIS_MAX_TICKS")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let log_path = env::var("FOLD_TETRIS_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());

        let log_level = env::var("FOLD_TETRIS_LOG_LEVEL")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            seed,
            tick_ms,
            max_ticks,
            log_path,
            log_level,
        }
    }

    /// Ticks a replay should run
    pub fn replay_ticks(&self) -> u64 {
        self.max_ticks.unwrap_or(DEFAULT_REPLAY_TICKS)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            tick_ms: TICK_RATE_MS,
            max_ticks: None,
            log_path: DEFAULT_LOG_PATH.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

/// Parse `[play|replay] [flags]`, applying flags on top of `config`.
///
/// Flags: `--seed N`, `--tick-ms N`, `--max-ticks N`, `--log PATH`,
/// `--log-level LEVEL`, and `--script SCRIPT` (replay only).
pub fn parse_args(args: &[String], config: &mut SessionConfig) -> Result<Command> {
    let mut i = 0usize;
    let mut replay = false;
    match args.first().map(String::as_str) {
        Some("play") => i = 1,
        Some("replay") => {
            replay = true;
            i = 1;
        }
        _ => {}
    }

    let mut script: Option<String> = None;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" => {
                i += 1;
                let v = flag_value(args, i, flag)?;
                config.seed = v
                    .parse()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--tick-ms" => {
                i += 1;
                let v = flag_value(args, i, flag)?;
                config.tick_ms = v
                    .parse()
                    .ok()
                    .filter(|&ms: &u64| ms > 0)
                    .ok_or_else(|| anyhow!("invalid --tick-ms value: {}", v))?;
            }
            "--max-ticks" => {
                i += 1;
                let v = flag_value(args, i, flag)?;
                config.max_ticks = Some(
                    v.parse()
                        .map_err(|_| anyhow!("invalid --max-ticks value: {}", v))?,
                );
            }
            "--log" => {
                i += 1;
                config.log_path = flag_value(args, i, flag)?.to_string();
            }
            "--log-level" => {
                i += 1;
                let v = flag_value(args, i, flag)?;
                config.log_level = v
                    .parse()
                    .map_err(|_| anyhow!("invalid --log-level value: {}", v))?;
            }
            "--script" if replay => {
                i += 1;
                script = Some(flag_value(args, i, flag)?.to_string());
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    if replay {
        Ok(Command::Replay {
            script: script.unwrap_or_default(),
        })
    } else {
        Ok(Command::Play)
    }
}
