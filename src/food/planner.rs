use serde::Serialize;

use crate::food::api::{Recipe, RecipeId};
use crate::food::currency::CurrencyConverter;

pub const MEAL_PLAN_DAYS: usize = 7;
/// Share of the total that is still paid after the 24% plan discount.
pub const MEAL_PLAN_DISCOUNT_FACTOR: f64 = 0.76;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlanEntry {
    /// 1-based.
    pub day: usize,
    pub recipe_id: RecipeId,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: u32,
    pub source_url: Option<String>,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealPlan {
    pub entries: Vec<MealPlanEntry>,
    pub total_cost: f64,
    pub discounted_total: f64,
    pub saved_amount: f64,
}

impl MealPlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn days(&self) -> usize {
        self.entries.len()
    }
}

/// One favorite per day for up to a week, costed in the converter's currency.
pub fn build_plan(favorites: &[Recipe], converter: &CurrencyConverter) -> MealPlan {
    let day_count = favorites.len().min(MEAL_PLAN_DAYS);
    let mut plan = MealPlan::default();

    for (i, recipe) in favorites.iter().take(day_count).enumerate() {
        let servings = recipe.servings.unwrap_or(1);
        let per_serving = converter.per_serving(recipe.price_per_serving.unwrap_or(0.0));
        let cost = per_serving * f64::from(servings);
        plan.total_cost += cost;

        plan.entries.push(MealPlanEntry {
            day: i + 1,
            recipe_id: recipe.id,
            title: recipe.display_title().to_string(),
            image: recipe.image.clone(),
            ready_in_minutes: recipe.ready_in_minutes,
            servings,
            source_url: recipe.source_url.clone(),
            cost,
        });
    }

    plan.discounted_total = plan.total_cost * MEAL_PLAN_DISCOUNT_FACTOR;
    plan.saved_amount = plan.total_cost - plan.discounted_total;
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn priced(id: u64, cents: f64, servings: u32) -> Recipe {
        Recipe {
            id: RecipeId(id),
            title: Some(format!("Dish {}", id)),
            servings: Some(servings),
            price_per_serving: Some(cents),
            ready_in_minutes: Some(20),
            source_url: Some(format!("https://example.com/{}", id)),
            ..Default::default()
        }
    }

    #[test]
    fn test_three_favorites_costs() {
        let favorites: Vec<Recipe> = (1..=3).map(|id| priced(id, 500.0, 2)).collect();
        let plan = build_plan(&favorites, &CurrencyConverter::default());

        assert_eq!(plan.days(), 3);
        assert!((plan.total_cost - 25.50).abs() < EPS);
        assert!((plan.discounted_total - 19.38).abs() < EPS);
        assert!((plan.saved_amount - 6.12).abs() < EPS);
        assert!((plan.entries[0].cost - 8.5).abs() < EPS);
    }

    #[test]
    fn test_empty_favorites_gives_empty_plan() {
        let plan = build_plan(&[], &CurrencyConverter::default());
        assert!(plan.is_empty());
        assert_eq!(plan.total_cost, 0.0);
        assert_eq!(plan.discounted_total, 0.0);
        assert_eq!(plan.saved_amount, 0.0);
    }

    #[test]
    fn test_plan_stops_at_a_week_and_keeps_order() {
        let favorites: Vec<Recipe> = (1..=9).map(|id| priced(id, 100.0, 1)).collect();
        let plan = build_plan(&favorites, &CurrencyConverter::default());
        assert_eq!(plan.days(), MEAL_PLAN_DAYS);
        let days: Vec<usize> = plan.entries.iter().map(|e| e.day).collect();
        assert_eq!(days, (1..=7).collect::<Vec<_>>());
        assert_eq!(plan.entries[6].recipe_id, RecipeId(7));
    }

    #[test]
    fn test_missing_price_and_servings() {
        let recipe = Recipe {
            id: RecipeId(1),
            ..Default::default()
        };
        let plan = build_plan(&[recipe], &CurrencyConverter::default());
        assert_eq!(plan.entries[0].servings, 1);
        assert_eq!(plan.entries[0].cost, 0.0);
        assert_eq!(plan.entries[0].title, "Untitled recipe");
    }
}
