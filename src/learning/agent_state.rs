use serde::{Deserialize, Serialize};

use crate::environment::Position;

/// Directional state: the sign of the target offset on each axis.
///
/// The full agent x target position space (256 x 256 cells) collapses to
/// these nine classes. The encoding is deliberately lossy; it throws away
/// distance and keeps only direction, which is what lets the tabular agent
/// converge within tens of episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirState {
    pub d_row: i8,
    pub d_col: i8,
}

impl DirState {
    pub const COUNT: usize = 9;

    pub fn encode(agent: &Position, target: &Position) -> Self {
        DirState {
            d_row: (target.row - agent.row).signum() as i8,
            d_col: (target.col - agent.col).signum() as i8,
        }
    }

    /// Dense index in 0..COUNT, row-major over (d_row, d_col).
    pub fn index(&self) -> usize {
        ((self.d_row + 1) * 3 + (self.d_col + 1)) as usize
    }

    /// Iterate over all nine directional states in index order.
    pub fn iter() -> impl Iterator<Item = DirState> {
        (-1i8..=1).flat_map(|d_row| (-1i8..=1).map(move |d_col| DirState { d_row, d_col }))
    }

    /// Human-readable label, used when dumping the learned policy.
    pub fn describe(&self) -> &'static str {
        match (self.d_row, self.d_col) {
            (-1, -1) => "target is UP-LEFT",
            (-1, 0) => "target is UP",
            (-1, 1) => "target is UP-RIGHT",
            (0, -1) => "target is LEFT",
            (0, 0) => "target is HERE",
            (0, 1) => "target is RIGHT",
            (1, -1) => "target is DOWN-LEFT",
            (1, 0) => "target is DOWN",
            (1, 1) => "target is DOWN-RIGHT",
            _ => "target is off the compass",
        }
    }
}
