pub mod config;
pub mod simulation;
pub mod detection;
pub mod render;
pub mod report;
pub mod error;

pub use simulation::*;
pub use config::*;
pub use error::SimulationError;
