pub mod heuristic;
pub mod random;
pub mod registry;

pub use heuristic::HeuristicPolicy;
pub use random::RandomPolicy;
