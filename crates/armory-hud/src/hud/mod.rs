pub mod app;
pub mod view;

pub use app::HudApp;
pub use view::{render, sound_cue};
