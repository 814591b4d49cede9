use rand::Rng;
use rand::distr::Distribution;
use rand::distr::StandardUniform as Standard;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::Int;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// Unit (row, col) delta applied to the agent's position.
    pub fn delta(&self) -> (Int, Int) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// Dense index 0..4, used to address rows of the value table.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Distribution<Action> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        match rng.random_range(0..4) {
            0 => Action::Up,
            1 => Action::Down,
            2 => Action::Left,
            _ => Action::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_indices_are_dense() {
        let indices: Vec<usize> = Action::iter().map(|a| a.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_deltas_are_unit_moves() {
        for action in Action::iter() {
            let (d_row, d_col) = action.delta();
            assert_eq!(d_row.abs() + d_col.abs(), 1);
        }
    }
}
