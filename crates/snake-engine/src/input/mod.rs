pub mod direction;
pub mod queue;
