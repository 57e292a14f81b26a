pub mod about;
pub mod api;
pub mod commands;
pub mod config;
pub mod food;

// Re-export commonly used items
pub use food::api::{RecipeService, SpoonacularClient};
pub use food::config::FoodConfig;
pub use food::{FoodError, Session};
