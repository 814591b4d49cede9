use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::UInt;
use crate::config::Config;
use crate::environment::GridEnvironment;
use crate::learning::q_agent::QLearningAgent;

/// Drives episodes against a single environment with one shared rng. The
/// environment is stateful and strictly sequential: each transition,
/// including the learning update, completes before the next action is
/// chosen.
pub struct Trainer {
    pub env: GridEnvironment,
    rng: StdRng,
}

impl Trainer {
    pub fn new(config: &Config) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let env = GridEnvironment::new(config.grid_size, &mut rng);
        Trainer { env, rng }
    }

    /// One training episode: act, step, learn, until a wall collision or the
    /// step cap. Decays exploration once at the end and returns the score.
    pub fn run_episode(&mut self, agent: &mut QLearningAgent, max_steps: UInt) -> UInt {
        self.env.reset(&mut self.rng);
        let mut state = self.env.encoded_state();
        for _ in 0..max_steps {
            let action = agent.choose_action(state, &mut self.rng);
            let (_, reward, done) = self.env.step(action, &mut self.rng);
            let next_state = self.env.encoded_state();
            agent.learn(state, action, reward, next_state, done);
            state = next_state;
            if done {
                break;
            }
        }
        agent.decay_exploration();
        debug!(
            "episode {} finished with score {}",
            self.env.episode(),
            self.env.score()
        );
        self.env.score()
    }

    pub fn train(&mut self, agent: &mut QLearningAgent, episodes: UInt, max_steps: UInt) -> Vec<UInt> {
        let mut scores = Vec::with_capacity(episodes as usize);
        for episode in 1..=episodes {
            scores.push(self.run_episode(agent, max_steps));
            if episode % 5 == 0 {
                let avg = scores.iter().rev().take(5).map(|s| *s as f32).sum::<f32>() / 5.0;
                info!(
                    "episode {episode:3} | avg score: {avg:.1} | epsilon: {:.2}",
                    agent.epsilon()
                );
            }
        }
        scores
    }

    /// Greedy rollouts: exploration forced to zero and no learning updates.
    /// The agent's epsilon is put back afterwards.
    pub fn evaluate(&mut self, agent: &mut QLearningAgent, episodes: UInt, max_steps: UInt) -> Vec<UInt> {
        let saved_epsilon = agent.epsilon();
        agent.set_epsilon(0.0);
        let mut scores = Vec::with_capacity(episodes as usize);
        for _ in 0..episodes {
            self.env.reset(&mut self.rng);
            for _ in 0..max_steps {
                let action = agent.choose_action(self.env.encoded_state(), &mut self.rng);
                let (_, _, done) = self.env.step(action, &mut self.rng);
                if done {
                    break;
                }
            }
            scores.push(self.env.score());
        }
        agent.set_epsilon(saved_epsilon);
        scores
    }

    /// Rolls out the hand-written optimal policy. Shows the score ceiling a
    /// trained agent should approach.
    pub fn demo_optimal(&mut self, episodes: UInt, max_steps: UInt) -> Vec<UInt> {
        let mut scores = Vec::with_capacity(episodes as usize);
        for _ in 0..episodes {
            self.env.reset(&mut self.rng);
            for _ in 0..max_steps {
                let action = self.env.optimal_action();
                let (_, _, done) = self.env.step(action, &mut self.rng);
                if done {
                    break;
                }
            }
            scores.push(self.env.score());
        }
        scores
    }
}
