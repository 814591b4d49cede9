use std::path::Path;

use gridbot::config::Config;
use gridbot::learning::agent_state::DirState;
use gridbot::learning::persistence;
use gridbot::learning::q_agent::QLearningAgent;
use gridbot::training::Trainer;
use itertools::Itertools;
use log::{info, warn};

fn main() {
    env_logger::init();

    let config = match Config::from_file(Path::new("gridbot.toml")) {
        Ok(config) => config,
        Err(err) => {
            warn!("could not read gridbot.toml ({err}), using defaults");
            Config::default()
        }
    };

    let mut agent = QLearningAgent::from_config(&config);
    let brain_path = Path::new(&config.brain_file);
    match persistence::load(&mut agent, brain_path) {
        Ok(true) => info!("resuming from {}", brain_path.display()),
        Ok(false) => info!("no saved table at {}, starting cold", brain_path.display()),
        Err(err) => warn!("could not load {} ({err}), starting cold", brain_path.display()),
    }

    let mut trainer = Trainer::new(&config);

    let demo_scores = trainer.demo_optimal(3, config.max_steps);
    info!("optimal-policy demo scores: {demo_scores:?}");

    let scores = trainer.train(&mut agent, config.episodes, config.max_steps);
    let mean = scores.iter().map(|s| *s as f32).sum::<f32>() / scores.len().max(1) as f32;
    info!("trained {} episodes, mean score {mean:.2}", scores.len());

    // Peek inside the learned policy, one line per directional state.
    println!("state -> best action(s) (q-values)");
    for state in DirState::iter() {
        let values = agent
            .q_table
            .values(state)
            .iter()
            .map(|v| format!("{v:.1}"))
            .collect_vec();
        println!(
            "  {:20} -> {:?}  Q={:?}",
            state.describe(),
            agent.q_table.best_actions(state),
            values
        );
    }

    let eval_scores = trainer.evaluate(&mut agent, 5, config.max_steps);
    info!("greedy evaluation scores: {eval_scores:?}");

    if let Err(err) = persistence::save(&agent, brain_path) {
        warn!("failed to save value table: {err}");
    }
}
