pub mod config;
pub mod error;
pub mod policy;
mod q_learning;
pub mod report;
pub mod rollout;
mod sarsa;
pub mod solver;
pub mod table;
mod td;
mod value_iteration;

pub use q_learning::QLearning;
pub use sarsa::Sarsa;
pub use value_iteration::ValueIteration;

#[cfg(test)]
mod tests;
