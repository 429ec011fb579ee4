//! Key-repeat suppression for terminal environments.
//!
//! A key fires once when it goes down and stays silent until it comes back up.
//! Terminals that report event kinds send `Repeat`/`Release`; terminals that do
//! not just resend `Press`, so a held key is also released after a quiet timeout.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::Action;

/// Most keys tracked as held at once; covers every distinct key `map_key` accepts
const MAX_HELD_KEYS: usize = 16;

/// Most actions produced from one batch of events
pub const MAX_BATCH_ACTIONS: usize = 16;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that swallows the next tap.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    code: KeyCode,
    last_seen_ms: u64,
}

/// Tracks held keys and turns key transitions into actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: ArrayVec<HeldKey, MAX_HELD_KEYS>,
    key_release_timeout_ms: u64,
}

/// Letters are matched case-insensitively so Shift does not count as a new key.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    /// Whether `code` is currently considered held
    pub fn is_held(&self, code: KeyCode) -> bool {
        let code = normalize(code);
        self.held.iter().any(|k| k.code == code)
    }

    /// Handle one terminal key event observed at `now_ms`
    pub fn handle_event(&mut self, key: KeyEvent, now_ms: u64) -> Option<Action> {
        match key.kind {
            KeyEventKind::Press => self.handle_key_press(key, now_ms),
            KeyEventKind::Repeat => {
                self.touch(key.code, now_ms);
                None
            }
            KeyEventKind::Release => {
                self.handle_key_release(key.code);
                None
            }
        }
    }

    pub fn handle_key_press(&mut self, key: KeyEvent, now_ms: u64) -> Option<Action> {
        let action = map_key(key)?;
        self.expire(now_ms);

        if self.touch(key.code, now_ms) {
            return None;
        }

        // An untracked key would fire again on every repeat.
        self.held
            .try_push(HeldKey {
                code: normalize(key.code),
                last_seen_ms: now_ms,
            })
            .ok()?;
        Some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let code = normalize(code);
        self.held.retain(|k| k.code != code);
    }

    /// Release keys not seen for longer than the timeout
    pub fn expire(&mut self, now_ms: u64) {
        let timeout = self.key_release_timeout_ms;
        self.held
            .retain(|k| now_ms.saturating_sub(k.last_seen_ms) <= timeout);
    }

    /// Handle a burst of events read in one poll
    pub fn handle_batch(
        &mut self,
        events: impl IntoIterator<Item = KeyEvent>,
        now_ms: u64,
    ) -> ArrayVec<Action, MAX_BATCH_ACTIONS> {
        let mut actions = ArrayVec::new();
        for key in events {
            if let Some(action) = self.handle_event(key, now_ms) {
                let _ = actions.try_push(action);
            }
        }
        actions
    }

    pub fn reset(&mut self) {
        self.held.clear();
    }

    // Refresh a held key; false if it was not held.
    fn touch(&mut self, code: KeyCode, now_ms: u64) -> bool {
        let code = normalize(code);
        match self.held.iter_mut().find(|k| k.code == code) {
            Some(held) => {
                held.last_seen_ms = now_ms;
                true
            }
            None => false,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
