pub mod config;
pub mod events;
pub mod hud;
pub mod sys;
