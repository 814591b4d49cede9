pub mod agent_state;
pub mod persistence;
pub mod q_agent;
pub mod q_table;
