//! UI module - HUD and floating text.

mod floating_text;
mod hud;
mod plugin;

pub use floating_text::FloatingText;
pub use hud::{HealthBar, HudRoot, ScoreText};
pub use plugin::UiPlugin;
