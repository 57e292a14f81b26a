pub mod models;
pub mod spoonacular;

use async_trait::async_trait;
use std::path::Path;

use crate::food::error::FoodError;

// Re-export common types
pub use models::{
    Classification, FoodCategory, Ingredient, InstructionBlock, KeyStatus, Measure, Nutrient,
    Nutrition, NutritionEstimate, Recipe, RecipeId, RecipeSummary, SearchQuery, Step,
};
pub use spoonacular::SpoonacularClient;

/// The remote recipe service, one request per call and no retries.
#[async_trait]
pub trait RecipeService: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>, FoodError>;

    async fn recipe_details(&self, id: RecipeId) -> Result<Recipe, FoodError>;

    async fn similar_recipes(&self, id: RecipeId, number: u32) -> Result<Vec<RecipeSummary>, FoodError>;

    async fn classify_image(&self, image: &Path) -> Result<Classification, FoodError>;

    async fn validate_key(&self) -> Result<KeyStatus, FoodError>;
}
