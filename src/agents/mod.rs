//! Agents module - the per-entity behaviour state machines.
//!
//! Agents are plain components with no system parameters of their own. The
//! game's systems feed them the frame time, hand them collaborators from
//! [`services`] and apply nothing else; everything an agent does to the world
//! goes through those traits.

pub mod patrol;
pub mod player;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use patrol::{PatrolAgent, PatrolFrame, PatrolSettings};
pub use player::{PlayerAgent, PlayerSettings};
pub use services::*;
