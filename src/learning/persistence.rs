use std::fs;
use std::io;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::learning::q_agent::QLearningAgent;
use crate::learning::q_table::QTable;

/// On-disk form of a trained agent: the value table plus the exploration
/// rate it was left at, as one JSON document.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    q_table: QTable,
    epsilon: f32,
}

/// Writes the agent's table and epsilon to `path`, overwriting any
/// existing file.
pub fn save(agent: &QLearningAgent, path: &Path) -> io::Result<()> {
    let snapshot = Snapshot {
        q_table: agent.q_table.clone(),
        epsilon: agent.epsilon(),
    };
    let json = serde_json::to_string(&snapshot).map_err(io::Error::other)?;
    fs::write(path, json)?;
    info!("saved value table to {}", path.display());
    Ok(())
}

/// Restores a saved snapshot into `agent`. A missing file is a cold start:
/// reported as `Ok(false)` with the agent left untouched. Read or parse
/// failures surface as errors and also leave the agent untouched.
pub fn load(agent: &mut QLearningAgent, path: &Path) -> io::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let json = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&json).map_err(io::Error::other)?;
    agent.restore(snapshot.q_table, snapshot.epsilon);
    info!("loaded value table from {}", path.display());
    Ok(true)
}
