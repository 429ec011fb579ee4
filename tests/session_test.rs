//! Session loop tests on a paused tokio clock

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_test::{assert_err, assert_ok};

use fold_tetris::core::Frame;
use fold_tetris::engine::{run_session, replay, NullSink, Script, SessionConfig};
use fold_tetris::types::Action;

fn config(seed: u32, max_ticks: Option<u64>) -> SessionConfig {
    SessionConfig {
        seed,
        max_ticks,
        ..SessionConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_ticks_fire_at_the_configured_rate() {
    let (_tx, rx) = mpsc::channel(8);
    let start = tokio::time::Instant::now();
    let summary = assert_ok!(run_session(&config(3, Some(40)), rx, &mut NullSink).await);

    assert_eq!(summary.ticks, 40);
    assert_eq!(start.elapsed(), Duration::from_millis(40 * 100));
}

#[tokio::test(start_paused = true)]
async fn test_inputs_interleave_with_ticks() {
    let (tx, rx) = mpsc::channel(8);
    let cfg = config(9, Some(30));

    let sender = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        let _ = tx.send(Action::Move(-1)).await;
        tokio::time::sleep(Duration::from_millis(500)).await;
        let _ = tx.send(Action::Drop).await;
        // Keep the channel open past the tick limit.
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    let mut actions = Vec::new();
    let mut sink = |frame: &Frame| -> Result<()> {
        actions.push(frame.action);
        Ok(())
    };
    let summary = assert_ok!(run_session(&cfg, rx, &mut sink).await);
    sender.abort();

    assert_eq!(summary.inputs, 2);
    assert_eq!(actions.len(), 32);
    // Sent at 250ms: after ticks fired at 100ms and 200ms.
    assert_eq!(actions[2], Action::Move(-1));
    // Sent at 750ms: after seven ticks in total.
    assert_eq!(actions[8], Action::Drop);
}

#[tokio::test(start_paused = true)]
async fn test_live_session_matches_replay() {
    let (tx, rx) = mpsc::channel(8);
    let cfg = config(21, Some(60));

    let sender = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1050)).await;
        let _ = tx.send(Action::RotateRight).await;
        let _ = tx.send(Action::Move(1)).await;
        tokio::time::sleep(Duration::from_secs(60)).await;
    });
    let live = assert_ok!(run_session(&cfg, rx, &mut NullSink).await);
    sender.abort();

    // 1050ms is after ticks 0..=9 have fired, so the inputs land before tick 10.
    let script = assert_ok!("10:rotateRight,10:moveRight".parse::<Script>());
    let (offline, _) = assert_ok!(replay(21, &script, 60, &mut NullSink));
    assert_eq!(live, offline);
}

#[tokio::test(start_paused = true)]
async fn test_sink_failure_is_reported() {
    let (_tx, rx) = mpsc::channel(8);
    let mut sink = |_: &Frame| -> Result<()> { anyhow::bail!("terminal gone") };
    assert_err!(run_session(&config(1, Some(3)), rx, &mut sink).await);
}
