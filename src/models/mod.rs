pub mod spacecraft;
pub mod state_space;

pub use state_space::{CostWeights, StateSpaceModel};
