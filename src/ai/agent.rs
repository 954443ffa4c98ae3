use crate::game::GameState;

/// Anything that can pick a column for the player to move.
pub trait Agent {
    /// Select a column for `state.current_player()`, or `None` when no
    /// column is playable.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
