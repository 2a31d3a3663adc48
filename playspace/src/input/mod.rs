//! Controller input handling

pub mod arbiter;

pub use arbiter::{Hand, MoveHandArbiter};
