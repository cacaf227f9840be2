pub mod builtin_themes;
pub mod keybindings;
pub mod loader;
pub mod state;
pub mod types;
