use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;

/// Last known top-left corner of the widget window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Default for Position {
    fn default() -> Self {
        Position { x: 100, y: 100 }
    }
}

/// Process-wide widget state that survives a restart: the evaluation
/// history and where the window was left. Serializes to the same shape a
/// host would keep in its own settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub position: Position,
}

/// Persistence collaborator. The storage medium is the host's concern;
/// the engine only promises to hand over the full state after every
/// change worth keeping.
pub trait Store {
    fn load(&self) -> WidgetState;
    fn save(&mut self, state: &WidgetState);
}

/// In-memory store, the default when the host persists nothing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: WidgetState,
}

impl MemoryStore {
    pub fn with_state(state: WidgetState) -> Self {
        MemoryStore { state }
    }

    /// The state most recently handed to `save`.
    pub fn saved(&self) -> &WidgetState {
        &self.state
    }
}

impl Store for MemoryStore {
    fn load(&self) -> WidgetState {
        self.state.clone()
    }

    fn save(&mut self, state: &WidgetState) {
        self.state = state.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let state = WidgetState {
            history: vec![HistoryEntry {
                expr: "1÷4".to_string(),
                result: 0.25,
            }],
            position: Position { x: 12, y: 300 },
        };
        let text = serde_json::to_string(&state).unwrap();
        let back: WidgetState = serde_json::from_str(&text).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let state: WidgetState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, WidgetState::default());
        assert_eq!(state.position, Position { x: 100, y: 100 });
    }
}
