//! Play-space mover: the applier and the central controller

pub mod applier;
pub mod center;

pub use applier::OriginApplier;
pub use center::MoveCenter;
