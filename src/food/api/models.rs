use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spoonacular recipe id. Treated as an opaque token everywhere outside the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(RecipeId)
            .map_err(|_| format!("'{}' is not a valid recipe id", s.trim()))
    }
}

/// Full recipe as returned by `/recipes/{id}/information?includeNutrition=true`.
///
/// Every field besides the id can be absent, and the views fall back per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: RecipeId,
    pub title: Option<String>,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    /// US cents, often fractional.
    pub price_per_serving: Option<f64>,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub analyzed_instructions: Vec<InstructionBlock>,
    pub nutrition: Option<Nutrition>,
}

impl Recipe {
    /// The information endpoint answers with a bare object when it has nothing
    /// for an id, so a title is what tells a real recipe apart.
    pub fn has_details(&self) -> bool {
        self.title.is_some()
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled recipe")
    }

    pub fn source_label(&self) -> &str {
        self.source_name.as_deref().unwrap_or("Recipe")
    }

    /// Steps of the first analyzed instruction block.
    pub fn steps(&self) -> &[Step] {
        self.analyzed_instructions
            .first()
            .map(|block| block.steps.as_slice())
            .unwrap_or(&[])
    }

    pub fn nutrients(&self) -> &[Nutrient] {
        self.nutrition
            .as_ref()
            .map(|n| n.nutrients.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub original: Option<String>,
}

impl Ingredient {
    pub fn new(name: &str, amount: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: Some(amount),
            unit: Some(unit.to_string()),
            original: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub percent_of_daily_needs: f64,
}

/// Short recipe entry from search, similar-recipes and image analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: Option<String>,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    #[serde(alias = "url")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RecipeSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Comma separated, passed through as typed.
    pub ingredients: String,
    pub max_ready_time: u32,
    pub number: u32,
}

/// Result of `/food/images/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Option<FoodCategory>,
    pub nutrition: Option<NutritionEstimate>,
    #[serde(default)]
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub probability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub calories: Option<Measure>,
    pub fat: Option<Measure>,
    pub protein: Option<Measure>,
    pub carbs: Option<Measure>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub value: f64,
    pub unit: Option<String>,
}

/// Quota figures read from the probe's `x-api-quota-*` headers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyStatus {
    pub quota_used: f64,
    pub quota_remaining: f64,
}
