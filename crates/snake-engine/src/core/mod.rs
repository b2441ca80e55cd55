pub mod grid;
pub mod rng;
pub mod round;
pub mod time;
