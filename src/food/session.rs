use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::food::api::{Classification, KeyStatus, Recipe, RecipeId, RecipeService, RecipeSummary, SearchQuery};
use crate::food::config::FoodConfig;
use crate::food::currency::CurrencyConverter;
use crate::food::error::FoodError;
use crate::food::favorites::{AddOutcome, Favorites};
use crate::food::grocery::{self, GroceryList};
use crate::food::planner::{self, MealPlan};

pub const MIN_READY_TIME: u32 = 10;
pub const MAX_READY_TIME: u32 = 120;
pub const DEFAULT_READY_TIME: u32 = 30;

/// A looked-up recipe, or the id of one the service had no details for.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHit {
    Found(Recipe),
    Missing { id: RecipeId },
}

impl SearchHit {
    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            SearchHit::Found(recipe) => Some(recipe),
            SearchHit::Missing { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub classification: Classification,
    pub hits: Vec<SearchHit>,
}

/// Everything one user works with: key, favorites and the last results.
///
/// Owned by the REPL loop or by one entry of the API server's session map.
pub struct Session {
    service: Arc<dyn RecipeService>,
    config: FoodConfig,
    converter: CurrencyConverter,
    favorites: Favorites,
    results: Vec<Recipe>,
    max_ready_time: u32,
    temp_image: PathBuf,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(service: Arc<dyn RecipeService>, config: FoodConfig) -> Self {
        Self {
            service,
            converter: CurrencyConverter::new(config.eur_rate),
            temp_image: config.temp_image.clone(),
            config,
            favorites: Favorites::new(),
            results: Vec::new(),
            max_ready_time: DEFAULT_READY_TIME,
            created_at: Utc::now(),
        }
    }

    /// Probes the key before handing out a usable session.
    pub async fn open(
        service: Arc<dyn RecipeService>,
        config: FoodConfig,
    ) -> Result<(Self, KeyStatus), FoodError> {
        let status = service.validate_key().await?;
        Ok((Self::new(service, config), status))
    }

    pub fn with_temp_image(mut self, path: PathBuf) -> Self {
        self.temp_image = path;
        self
    }

    pub fn config(&self) -> &FoodConfig {
        &self.config
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn max_ready_time(&self) -> u32 {
        self.max_ready_time
    }

    pub fn set_max_ready_time(&mut self, minutes: u32) -> Result<(), FoodError> {
        if !(MIN_READY_TIME..=MAX_READY_TIME).contains(&minutes) {
            return Err(FoodError::InvalidInput(format!(
                "ready time must be between {} and {} minutes",
                MIN_READY_TIME, MAX_READY_TIME
            )));
        }
        self.max_ready_time = minutes;
        Ok(())
    }

    /// Searches by ingredients, then looks up each hit's details in turn.
    pub async fn search(&mut self, ingredients: &str) -> Result<Vec<SearchHit>, FoodError> {
        let query = SearchQuery {
            ingredients: ingredients.trim().to_string(),
            max_ready_time: self.max_ready_time,
            number: self.config.search_results,
        };
        let summaries = self.service.search(&query).await?;

        let mut hits = Vec::with_capacity(summaries.len());
        for summary in summaries {
            hits.push(self.lookup(summary.id).await?);
        }

        self.results = hits.iter().filter_map(|hit| hit.recipe().cloned()).collect();
        Ok(hits)
    }

    /// A recipe the service cannot answer for becomes a missing hit; only key
    /// and transport failures end the whole view.
    async fn lookup(&self, id: RecipeId) -> Result<SearchHit, FoodError> {
        match self.service.recipe_details(id).await {
            Ok(recipe) if recipe.has_details() => Ok(SearchHit::Found(recipe)),
            Ok(_) => {
                log::warn!("No details for recipe {}", id);
                Ok(SearchHit::Missing { id })
            }
            Err(e @ (FoodError::Status { .. } | FoodError::Decode(_))) => {
                log::warn!("Details lookup for recipe {} failed: {}", id, e);
                Ok(SearchHit::Missing { id })
            }
            Err(e) => Err(e),
        }
    }

    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    pub fn add_favorite(&mut self, id: RecipeId) -> AddOutcome {
        let outcome = self.favorites.add(id);
        log::debug!("Favorite {} -> {:?}", id, outcome);
        outcome
    }

    pub fn remove_favorite(&mut self, id: RecipeId) -> bool {
        self.favorites.remove(id)
    }

    pub fn favorite_ids(&self) -> &[RecipeId] {
        self.favorites.list()
    }

    /// Fresh details for every favorite, in the order they were added.
    pub async fn favorite_recipes(&self) -> Result<Vec<Recipe>, FoodError> {
        let mut recipes = Vec::with_capacity(self.favorites.len());
        for id in self.favorites.list() {
            recipes.push(self.service.recipe_details(*id).await?);
        }
        Ok(recipes)
    }

    pub async fn grocery_list(&self) -> Result<GroceryList, FoodError> {
        let recipes = self.favorite_recipes().await?;
        Ok(grocery::aggregate(&recipes))
    }

    pub async fn meal_plan(&self) -> Result<MealPlan, FoodError> {
        let recipes = self.favorite_recipes().await?;
        Ok(planner::build_plan(&recipes, &self.converter))
    }

    pub async fn similar(&self, id: RecipeId) -> Result<Vec<RecipeSummary>, FoodError> {
        self.service
            .similar_recipes(id, self.config.similar_results)
            .await
    }

    /// Last search results first, then the service.
    pub async fn find_recipe(&self, id: RecipeId) -> Result<Recipe, FoodError> {
        if let Some(recipe) = self.results.iter().find(|r| r.id == id) {
            return Ok(recipe.clone());
        }
        self.service.recipe_details(id).await
    }

    /// Stages the upload at the session's temporary path and classifies it.
    pub async fn classify(&self, image: &[u8]) -> Result<ClassificationReport, FoodError> {
        check_image(image)?;
        tokio::fs::write(&self.temp_image, image).await?;
        log::debug!("Staged {} bytes at {}", image.len(), self.temp_image.display());

        let classification = self.service.classify_image(&self.temp_image).await;
        self.discard_staged_image().await;
        let classification = classification?;

        let mut hits = Vec::new();
        let mut found = 0;
        if classification.category.is_some() {
            for candidate in &classification.recipes {
                if found >= self.config.classify_recipes {
                    break;
                }
                let hit = self.lookup(candidate.id).await?;
                if hit.recipe().is_some() {
                    found += 1;
                }
                hits.push(hit);
            }
        }

        Ok(ClassificationReport {
            classification,
            hits,
        })
    }

    /// Path uploads are staged at before classification.
    pub fn temp_image(&self) -> &Path {
        &self.temp_image
    }

    /// Removes the staged upload, if any is left on disk.
    pub async fn discard_staged_image(&self) {
        match tokio::fs::remove_file(&self.temp_image).await {
            Ok(()) => log::debug!("Removed staged image {}", self.temp_image.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "Failed to remove staged image {}: {}",
                self.temp_image.display(),
                e
            ),
        }
    }

    pub async fn classify_file(&self, path: &Path) -> Result<ClassificationReport, FoodError> {
        let bytes = tokio::fs::read(path).await?;
        self.classify(&bytes).await
    }
}

/// Only JPEG and PNG uploads are forwarded.
pub fn check_image(bytes: &[u8]) -> Result<(), FoodError> {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) | Ok(image::ImageFormat::Png) => Ok(()),
        Ok(other) => Err(FoodError::UnsupportedImage(format!(
            "{:?} files are not accepted, use jpg, jpeg or png",
            other
        ))),
        Err(_) => Err(FoodError::UnsupportedImage(
            "not a recognizable image, use jpg, jpeg or png".to_string(),
        )),
    }
}
