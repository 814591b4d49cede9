pub mod actions;
pub mod config;
pub mod environment;
pub mod learning;
pub mod training;

pub type Int = i32;
pub type UInt = u32;

/// Reward for stepping onto the target cell.
pub const FOOD_REWARD: f32 = 10.0;
/// Reward for attempting to leave the grid. Terminal.
pub const WALL_PENALTY: f32 = -10.0;
/// Base reward for a move into an empty cell.
pub const STEP_REWARD: f32 = 0.0;
/// Shaping bonus when a move strictly reduces Manhattan distance to the target.
pub const CLOSER_BONUS: f32 = 1.0;
/// Shaping penalty when a move strictly increases it.
pub const FARTHER_PENALTY: f32 = 1.0;
