use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::actions::Action;
use crate::learning::agent_state::DirState;

pub const NUM_ACTIONS: usize = 4;

/// Dense value table over the nine directional states. The source of truth
/// for the policy: one row per state, one f32 per action. Rows start at
/// zero, so untried state-action pairs look value-neutral rather than
/// optimistic or pessimistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: [[f32; NUM_ACTIONS]; DirState::COUNT],
}

impl Default for QTable {
    fn default() -> Self {
        QTable {
            values: [[0.0; NUM_ACTIONS]; DirState::COUNT],
        }
    }
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self, state: DirState) -> &[f32; NUM_ACTIONS] {
        &self.values[state.index()]
    }

    pub fn get(&self, state: DirState, action: Action) -> f32 {
        self.values[state.index()][action.index()]
    }

    pub fn get_mut(&mut self, state: DirState, action: Action) -> &mut f32 {
        &mut self.values[state.index()][action.index()]
    }

    pub fn max_value(&self, state: DirState) -> f32 {
        self.values(state)
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Every action whose value ties the row maximum exactly. Never empty.
    pub fn best_actions(&self, state: DirState) -> Vec<Action> {
        Action::iter()
            .zip(self.values(state).iter())
            .max_set_by(|a, b| a.1.partial_cmp(b.1).expect("q-values are finite"))
            .into_iter()
            .map(|(action, _)| action)
            .collect()
    }
}
