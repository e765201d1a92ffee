//! Core game module - states, events, score and the service bridge.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod plugin;
mod score;
mod services;
mod states;

pub use events::*;
pub use plugin::{CorePlugin, GameSet};
pub use score::GameScore;
pub use services::EventServices;
pub use states::*;
