use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::learning::agent_state::DirState;
use crate::{CLOSER_BONUS, FARTHER_PENALTY, FOOD_REWARD, Int, STEP_REWARD, UInt, WALL_PENALTY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: Int,
    pub col: Int,
}

impl Position {
    pub fn manhattan(&self, other: &Position) -> Int {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

/// Everything that changes over the course of an episode. Reset in place at
/// episode start; `episode` only ever increases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeState {
    pub agent: Position,
    pub target: Position,
    pub score: UInt,
    pub last_reward: f32,
    pub done: bool,
    pub episode: UInt,
}

/// N x N grid with one agent and one target cell. `step` is the sole mutator
/// of positions and score; a wall collision is a normal terminal transition,
/// not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridEnvironment {
    size: Int,
    state: EpisodeState,
}

impl GridEnvironment {
    pub fn new<R: Rng + ?Sized>(size: Int, rng: &mut R) -> Self {
        let agent = Position {
            row: size / 2,
            col: size / 2,
        };
        let target = Self::sample_target(size, agent, rng);
        GridEnvironment {
            size,
            state: EpisodeState {
                agent,
                target,
                score: 0,
                last_reward: 0.0,
                done: false,
                episode: 0,
            },
        }
    }

    /// Uniform over all cells except the agent's own.
    fn sample_target<R: Rng + ?Sized>(size: Int, agent: Position, rng: &mut R) -> Position {
        loop {
            let target = Position {
                row: rng.random_range(0..size),
                col: rng.random_range(0..size),
            };
            if target != agent {
                return target;
            }
        }
    }

    /// Starts a new episode: agent back at the center cell, fresh target,
    /// score and reward zeroed, done cleared.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EpisodeState {
        self.state.agent = Position {
            row: self.size / 2,
            col: self.size / 2,
        };
        self.state.target = Self::sample_target(self.size, self.state.agent, rng);
        self.state.score = 0;
        self.state.last_reward = 0.0;
        self.state.done = false;
        self.state.episode += 1;
        debug!(
            "episode {} started, target at ({}, {})",
            self.state.episode, self.state.target.row, self.state.target.col
        );
        self.state
    }

    /// Applies one action. Leaving the grid ends the episode with
    /// `WALL_PENALTY` and leaves the position unchanged. Landing on the
    /// target scores a point, pays `FOOD_REWARD` and respawns the target;
    /// food capture suppresses distance shaping, so there is a single
    /// canonical reward per transition. Plain moves pay `STEP_REWARD` plus
    /// the Manhattan-distance shaping term.
    pub fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> (EpisodeState, f32, bool) {
        let (d_row, d_col) = action.delta();
        let candidate = Position {
            row: self.state.agent.row + d_row,
            col: self.state.agent.col + d_col,
        };

        let in_bounds = (0..self.size).contains(&candidate.row) && (0..self.size).contains(&candidate.col);
        if !in_bounds {
            self.state.done = true;
            self.state.last_reward = WALL_PENALTY;
            return (self.state, WALL_PENALTY, true);
        }

        let prev_distance = self.state.agent.manhattan(&self.state.target);
        self.state.agent = candidate;

        let reward = if candidate == self.state.target {
            self.state.score += 1;
            self.state.target = Self::sample_target(self.size, candidate, rng);
            FOOD_REWARD
        } else {
            let distance = candidate.manhattan(&self.state.target);
            let shaping = if distance < prev_distance {
                CLOSER_BONUS
            } else if distance > prev_distance {
                -FARTHER_PENALTY
            } else {
                0.0
            };
            STEP_REWARD + shaping
        };
        self.state.last_reward = reward;
        (self.state, reward, false)
    }

    /// The action that closes the Manhattan gap, vertical axis first. Falls
    /// back to Up when co-located, which only happens mid food capture.
    pub fn optimal_action(&self) -> Action {
        let agent = self.state.agent;
        let target = self.state.target;
        if target.row < agent.row {
            Action::Up
        } else if target.row > agent.row {
            Action::Down
        } else if target.col < agent.col {
            Action::Left
        } else if target.col > agent.col {
            Action::Right
        } else {
            Action::Up
        }
    }

    pub fn encoded_state(&self) -> DirState {
        DirState::encode(&self.state.agent, &self.state.target)
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn size(&self) -> Int {
        self.size
    }

    pub fn score(&self) -> UInt {
        self.state.score
    }

    pub fn episode(&self) -> UInt {
        self.state.episode
    }

    pub fn last_reward(&self) -> f32 {
        self.state.last_reward
    }
}
