pub mod api;
pub mod config;
pub mod currency;
pub mod error;
pub mod export;
pub mod favorites;
pub mod grocery;
pub mod planner;
pub mod render;
pub mod session;

pub use error::FoodError;
pub use session::Session;
