//! Shared helpers for the integration tests.

use std::collections::HashSet;

use noughts::{GameState, Mark};

/// Every state reachable from the empty grid when `starting_mark` opens,
/// including the empty grid and all terminal states.
pub fn reachable_states(starting_mark: Mark) -> Vec<GameState> {
    let mut seen = HashSet::new();
    let mut states = Vec::new();
    let mut stack = vec![GameState::start(starting_mark)];

    while let Some(state) = stack.pop() {
        if !seen.insert(state) {
            continue;
        }
        states.push(state);
        stack.extend(state.possible_moves().into_iter().map(|mv| mv.after_state));
    }

    states
}

/// Parse a layout for a game opened by `starting_mark`, without validation.
pub fn state(layout: &str, starting_mark: Mark) -> GameState {
    GameState::new(
        layout.parse().expect("test layout should be well formed"),
        starting_mark,
    )
}
