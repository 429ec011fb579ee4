//! Session loop: merge the clock with player input and fold both into the game.
//!
//! One task owns the [`Timeline`]. A fixed-rate interval produces ticks, a channel
//! delivers input actions, and `select!` interleaves them in arrival order. Every
//! fold step hands its [`Frame`] to a [`FrameSink`] before the next one starts.

use std::time::Duration;

use anyhow::Result;
use log::{debug, info};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::SessionConfig;
use crate::core::{Frame, State, TickClock, Timeline};
use crate::types::Action;

/// Consumer of frames (the render collaborator).
pub trait FrameSink {
    fn frame(&mut self, frame: &Frame) -> Result<()>;
}

impl<F> FrameSink for F
where
    F: FnMut(&Frame) -> Result<()>,
{
    fn frame(&mut self, frame: &Frame) -> Result<()> {
        self(frame)
    }
}

/// Sink that drops every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn frame(&mut self, _frame: &Frame) -> Result<()> {
        Ok(())
    }
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u32,
    pub ticks: u64,
    pub inputs: u64,
    pub score: u32,
    /// Stored highscore; only a restart folds the running score into it
    pub highscore: u32,
    /// `max(highscore, score)`, the best result of the session so far
    pub best_score: u32,
    pub level: f64,
    pub display_level: u32,
    pub game_end: bool,
    pub locked_units: usize,
}

impl SessionSummary {
    pub fn from_state(seed: u32, ticks: u64, inputs: u64, state: &State) -> Self {
        Self {
            seed,
            ticks,
            inputs,
            score: state.score,
            highscore: state.highscore,
            best_score: state.highscore.max(state.score),
            level: state.level,
            display_level: state.display_level(),
            game_end: state.game_end,
            locked_units: state.grid.len(),
        }
    }
}

/// Run until the input channel closes or `max_ticks` clock ticks have fired.
///
/// Inputs that are ready at the same instant as a tick are folded first.
pub async fn run_session<S: FrameSink>(
    config: &SessionConfig,
    mut inputs: mpsc::Receiver<Action>,
    sink: &mut S,
) -> Result<SessionSummary> {
    let period = Duration::from_millis(config.tick_ms.max(1));
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    let mut timeline = Timeline::new(State::new(config.seed));
    let mut clock = TickClock::new(config.seed);
    let mut input_count: u64 = 0;

    info!(
        "session start: seed {}, tick {}ms, max ticks {:?}",
        config.seed, config.tick_ms, config.max_ticks
    );

    loop {
        if config.max_ticks.is_some_and(|max| clock.elapsed() >= max) {
            debug!("tick limit reached");
            break;
        }

        tokio::select! {
            biased;

            input = inputs.recv() => match input {
                Some(action) => {
                    input_count += 1;
                    let frame = timeline.dispatch(action);
                    sink.frame(&frame)?;
                }
                None => {
                    debug!("input closed");
                    break;
                }
            },
            _ = interval.tick() => {
                let frame = timeline.dispatch(clock.next_tick());
                sink.frame(&frame)?;
            }
        }
    }

    let summary =
        SessionSummary::from_state(config.seed, clock.elapsed(), input_count, timeline.current());
    info!(
        "session end: {} ticks, {} inputs, score {}, best {}",
        summary.ticks, summary.inputs, summary.score, summary.best_score
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_ticks: Option<u64>) -> SessionConfig {
        SessionConfig {
            seed: 11,
            max_ticks,
            ..SessionConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_at_tick_limit() {
        let (_tx, rx) = mpsc::channel(8);
        let mut frames = 0u32;
        let mut sink = |_: &Frame| -> Result<()> {
            frames += 1;
            Ok(())
        };
        let summary = run_session(&config(Some(25)), rx, &mut sink).await.unwrap();
        assert_eq!(summary.ticks, 25);
        assert_eq!(summary.inputs, 0);
        assert_eq!(frames, 25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_input_closes() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(Action::Move(1)).await.unwrap();
        tx.send(Action::Drop).await.unwrap();
        drop(tx);

        let summary = run_session(&config(None), rx, &mut NullSink).await.unwrap();
        assert_eq!(summary.inputs, 2);
        assert_eq!(summary.ticks, 0);
    }

    #[test]
    fn test_summary_mirrors_state_highscore() {
        let state = State {
            score: 400,
            highscore: 250,
            ..State::new(3)
        };
        let summary = SessionSummary::from_state(3, 10, 0, &state);
        assert_eq!(summary.highscore, state.highscore);
        assert_eq!(summary.best_score, 400);

        let summary = SessionSummary::from_state(3, 10, 0, &State { score: 100, ..state });
        assert_eq!(summary.highscore, 250);
        assert_eq!(summary.best_score, 250);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_error_aborts_session() {
        let (_tx, rx) = mpsc::channel(8);
        let mut sink = |_: &Frame| -> Result<()> { Err(anyhow::anyhow!("render failed")) };
        assert!(run_session(&config(Some(5)), rx, &mut sink).await.is_err());
    }
}
