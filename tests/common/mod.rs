#![allow(dead_code)]

use async_trait::async_trait;
use lumine::food::api::{
    Classification, FoodCategory, Ingredient, KeyStatus, Recipe, RecipeId, RecipeService,
    RecipeSummary, SearchQuery,
};
use lumine::FoodError;
use std::collections::HashMap;
use std::path::Path;

pub const GOOD_KEY: &str = "good-key";
pub const SPENT_KEY: &str = "spent-key";

/// In-memory stand-in for Spoonacular.
#[derive(Debug, Clone, Default)]
pub struct FixtureService {
    pub recipes: HashMap<RecipeId, Recipe>,
    pub search: Vec<RecipeSummary>,
    pub classification: Classification,
    pub api_key: String,
}

#[async_trait]
impl RecipeService for FixtureService {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<RecipeSummary>, FoodError> {
        Ok(self.search.clone())
    }

    async fn recipe_details(&self, id: RecipeId) -> Result<Recipe, FoodError> {
        Ok(self.recipes.get(&id).cloned().unwrap_or(Recipe {
            id,
            ..Default::default()
        }))
    }

    async fn similar_recipes(&self, id: RecipeId, number: u32) -> Result<Vec<RecipeSummary>, FoodError> {
        Ok(self
            .search
            .iter()
            .filter(|s| s.id != id)
            .take(number as usize)
            .cloned()
            .collect())
    }

    async fn classify_image(&self, _image: &Path) -> Result<Classification, FoodError> {
        Ok(self.classification.clone())
    }

    async fn validate_key(&self) -> Result<KeyStatus, FoodError> {
        match self.api_key.as_str() {
            GOOD_KEY => Ok(KeyStatus {
                quota_used: 3.0,
                quota_remaining: 147.0,
            }),
            SPENT_KEY => Err(FoodError::QuotaExhausted),
            _ => Err(FoodError::InvalidApiKey),
        }
    }
}

pub fn recipe(id: u64, cents: f64, servings: u32, ingredients: Vec<Ingredient>) -> Recipe {
    Recipe {
        id: RecipeId(id),
        title: Some(format!("Dish {}", id)),
        ready_in_minutes: Some(25),
        servings: Some(servings),
        price_per_serving: Some(cents),
        source_name: Some("Test Kitchen".to_string()),
        source_url: Some(format!("https://example.com/recipes/{}", id)),
        extended_ingredients: ingredients,
        ..Default::default()
    }
}

pub fn summary(id: u64) -> RecipeSummary {
    RecipeSummary {
        id: RecipeId(id),
        title: Some(format!("Dish {}", id)),
        ..Default::default()
    }
}

/// Three priced recipes sharing eggs, plus a search that also returns an id
/// without details.
pub fn kitchen(api_key: &str) -> FixtureService {
    let mut service = FixtureService {
        api_key: api_key.to_string(),
        ..Default::default()
    };
    service.recipes.insert(
        RecipeId(1),
        recipe(1, 500.0, 2, vec![Ingredient::new("egg", 2.0, "pc"), Ingredient::new("flour", 200.0, "g")]),
    );
    service.recipes.insert(
        RecipeId(2),
        recipe(2, 500.0, 2, vec![Ingredient::new("egg", 3.0, "pc")]),
    );
    service.recipes.insert(
        RecipeId(3),
        recipe(3, 250.0, 4, vec![Ingredient::new("milk", 0.5, "l")]),
    );
    service.search = vec![summary(1), summary(404), summary(2)];
    service.classification = Classification {
        category: Some(FoodCategory {
            name: "omelette".to_string(),
            probability: 0.91,
        }),
        nutrition: None,
        recipes: vec![summary(2), summary(404), summary(3)],
    };
    service
}
