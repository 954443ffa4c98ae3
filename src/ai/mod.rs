//! Move selection: the agent trait, the line-counting heuristic, the
//! negamax searcher and a random baseline.

mod agent;
mod heuristic;
mod negamax;
mod random;

pub use agent::Agent;
pub use heuristic::{Evaluation, Heuristic, LineHeuristic, LineWeights};
pub use negamax::{NegamaxAgent, SearchConfig, SearchReport};
pub use random::RandomAgent;
