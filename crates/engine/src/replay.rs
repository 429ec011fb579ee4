//! Headless replay of a scripted input list.
//!
//! A script is a comma-separated list of `tick:action` entries, for example
//! `0:moveLeft,0:rotateRight,12:drop`. Entries scheduled at tick `n` are folded
//! before the `n`th clock tick, in script order.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use log::{debug, info};

use crate::core::{State, TickClock, Timeline};
use crate::session::{FrameSink, SessionSummary};
use crate::types::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptEvent {
    /// Clock tick the action is folded before
    pub at: u64,
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    MissingSeparator(String),
    InvalidTick(String),
    UnknownAction(String),
    OutOfOrder { at: u64, previous: u64 },
}

impl ScriptError {
    pub fn code(&self) -> &'static str {
        match self {
            ScriptError::MissingSeparator(_) => "missing_separator",
            ScriptError::InvalidTick(_) => "invalid_tick",
            ScriptError::UnknownAction(_) => "unknown_action",
            ScriptError::OutOfOrder { .. } => "out_of_order",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ScriptError::MissingSeparator(entry) => format!("expected tick:action, got {:?}", entry),
            ScriptError::InvalidTick(tick) => format!("invalid tick {:?}", tick),
            ScriptError::UnknownAction(name) => format!("unknown action {:?}", name),
            ScriptError::OutOfOrder { at, previous } => {
                format!("tick {} scheduled after tick {}", at, previous)
            }
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ScriptError {}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut events = Vec::new();
        let mut previous = 0u64;

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (tick, name) = entry
                .split_once(':')
                .ok_or_else(|| ScriptError::MissingSeparator(entry.to_string()))?;
            let tick = tick.trim();
            let at: u64 = tick
                .parse()
                .map_err(|_| ScriptError::InvalidTick(tick.to_string()))?;
            let name = name.trim();
            let action = Action::from_str(name)
                .ok_or_else(|| ScriptError::UnknownAction(name.to_string()))?;

            if at < previous {
                return Err(ScriptError::OutOfOrder { at, previous });
            }
            previous = at;
            events.push(ScriptEvent { at, action });
        }

        Ok(Script { events })
    }
}

impl Script {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Fold `script` against `ticks` clock ticks seeded with `seed`.
///
/// Events scheduled at or past `ticks` are still folded after the last tick, so a
/// trailing restart or drop is never lost.
pub fn replay<S: FrameSink>(
    seed: u32,
    script: &Script,
    ticks: u64,
    sink: &mut S,
) -> Result<(SessionSummary, State)> {
    let mut timeline = Timeline::new(State::new(seed));
    let mut clock = TickClock::new(seed);
    let mut pending = script.events.iter().peekable();

    info!(
        "replay: seed {}, {} scripted inputs, {} ticks",
        seed,
        script.len(),
        ticks
    );

    while clock.elapsed() < ticks {
        while let Some(event) = pending.next_if(|e| e.at <= clock.elapsed()) {
            let frame = timeline.dispatch(event.action);
            sink.frame(&frame)?;
        }
        let frame = timeline.dispatch(clock.next_tick());
        sink.frame(&frame)?;
    }
    for event in pending {
        debug!("late input {} at tick {}", event.action.as_str(), event.at);
        let frame = timeline.dispatch(event.action);
        sink.frame(&frame)?;
    }

    let state = timeline.current().as_ref().clone();
    let summary = SessionSummary::from_state(seed, clock.elapsed(), script.len() as u64, &state);
    info!(
        "replay done: score {}, level {}, game over {}",
        summary.score, summary.display_level, summary.game_end
    );
    Ok((summary, state))
}
