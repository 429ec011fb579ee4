//! Frame module - previous/current state pairs for renderers
//!
//! Renderers diff each state against the one before it. Instead of a chain of
//! back-references, every dispatch hands out a [`Frame`] holding exactly the two
//! states involved; older states are dropped as soon as no frame refers to them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::game_state::{reduce, State};
use crate::pieces::{Unit, UnitId};
use crate::types::Action;

/// The state before and after one action
#[derive(Debug, Clone)]
pub struct Frame {
    pub previous: Arc<State>,
    pub current: Arc<State>,
    pub action: Action,
}

impl Frame {
    /// True when the action left the state untouched
    pub fn is_unchanged(&self) -> bool {
        Arc::ptr_eq(&self.previous, &self.current) || self.previous == self.current
    }

    pub fn diff(&self) -> FrameDiff {
        FrameDiff::between(&self.previous, &self.current)
    }
}

/// What a renderer must change to go from one state to the next.
///
/// Playfield units (grid plus falling block) are matched by id: ids only in the
/// previous state are `removed`, ids only in the current one are `added`, and ids
/// in both at different cells are `moved`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameDiff {
    pub removed: Vec<UnitId>,
    pub added: Vec<Unit>,
    pub moved: Vec<Unit>,
    /// The next-block preview shows a different block
    pub preview_changed: bool,
    /// Score, display level or highscore changed
    pub stats_changed: bool,
    /// The game-over indicator toggled
    pub game_end_changed: bool,
}

fn playfield(state: &State) -> HashMap<UnitId, Unit> {
    state
        .grid
        .iter()
        .chain(state.current_block.units.iter())
        .map(|u| (u.id, *u))
        .collect()
}

impl FrameDiff {
    pub fn between(previous: &State, current: &State) -> Self {
        let before = playfield(previous);
        let after = playfield(current);

        let mut removed: Vec<UnitId> = before
            .keys()
            .filter(|id| !after.contains_key(id))
            .copied()
            .collect();
        let mut added: Vec<Unit> = after
            .values()
            .filter(|u| !before.contains_key(&u.id))
            .copied()
            .collect();
        let mut moved: Vec<Unit> = after
            .values()
            .filter(|u| {
                before
                    .get(&u.id)
                    .is_some_and(|old| (old.x, old.y) != (u.x, u.y))
            })
            .copied()
            .collect();

        removed.sort_unstable();
        added.sort_unstable_by_key(|u| u.id);
        moved.sort_unstable_by_key(|u| u.id);

        Self {
            removed,
            added,
            moved,
            preview_changed: previous.next_block != current.next_block,
            stats_changed: previous.score != current.score
                || previous.highscore != current.highscore
                || previous.display_level() != current.display_level(),
            game_end_changed: previous.game_end != current.game_end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.added.is_empty()
            && self.moved.is_empty()
            && !self.preview_changed
            && !self.stats_changed
            && !self.game_end_changed
    }
}

/// The running fold: the current state plus nothing older.
#[derive(Debug, Clone)]
pub struct Timeline {
    current: Arc<State>,
    dispatched: u64,
}

impl Timeline {
    pub fn new(initial: State) -> Self {
        Self {
            current: Arc::new(initial),
            dispatched: 0,
        }
    }

    pub fn current(&self) -> &Arc<State> {
        &self.current
    }

    /// Number of actions folded so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Fold one action and return the frame it produced
    pub fn dispatch(&mut self, action: Action) -> Frame {
        let next = reduce(&self.current, action);
        let current = if next == *self.current {
            Arc::clone(&self.current)
        } else {
            Arc::new(next)
        };
        let previous = std::mem::replace(&mut self.current, Arc::clone(&current));
        self.dispatched += 1;

        Frame {
            previous,
            current,
            action,
        }
    }
}
