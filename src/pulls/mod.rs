pub mod simulator;

pub use simulator::{PackPools, PullSimulator, BASELINE_SLOTS};
