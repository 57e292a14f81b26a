//! Plain-text views of recipes, plans and classifier results.
//!
//! Missing fields fall back to a "not available" line for that field only, so
//! a half-filled response still renders.

use std::fmt::Write;

use crate::food::api::{Classification, Measure, Recipe, RecipeSummary};
use crate::food::currency::CurrencyConverter;
use crate::food::grocery::GroceryList;
use crate::food::planner::MealPlan;

pub const NO_INSTRUCTIONS: &str = "No instructions available for this recipe.";
pub const NO_NUTRITION: &str = "Nutrition information not available.";
pub const NO_DETAILS: &str = "Recipe details not found. Please try another combination.";
pub const NOT_CLASSIFIED: &str = "Could not classify the image. Please try another one.";

/// `2.500000` -> `2.5`, `3.000000` -> `3`.
pub fn format_quantity(value: f64) -> String {
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn euros(amount: f64) -> String {
    format!("€{:.2}", amount)
}

pub fn recipe_heading(recipe: &Recipe, converter: &CurrencyConverter) -> String {
    let price = converter.per_serving(recipe.price_per_serving.unwrap_or(0.0));
    format!("{} ({} Per Serving) 🍽️", recipe.display_title(), euros(price))
}

pub fn timing_line(recipe: &Recipe) -> String {
    let ready = recipe
        .ready_in_minutes
        .map(|m| m.to_string())
        .unwrap_or_else(|| "?".to_string());
    let servings = recipe
        .servings
        .map(|s| s.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!("Ready in {} minutes. Servings: {}", ready, servings)
}

pub fn source_line(recipe: &Recipe) -> String {
    match &recipe.source_url {
        Some(url) => format!("Source: {} ({})", recipe.source_label(), url),
        None => "Source: not available".to_string(),
    }
}

pub fn ingredients(recipe: &Recipe) -> String {
    if recipe.extended_ingredients.is_empty() {
        return "No ingredients listed for this recipe.".to_string();
    }
    recipe
        .extended_ingredients
        .iter()
        .map(|ingredient| match &ingredient.original {
            Some(original) => format!("- {}", original),
            None => format!("- {}", ingredient.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn instructions(recipe: &Recipe) -> String {
    let steps = recipe.steps();
    if steps.is_empty() {
        return NO_INSTRUCTIONS.to_string();
    }
    steps
        .iter()
        .map(|step| format!("{}. {}", step.number, step.step))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First `rows` nutrients as an aligned table.
pub fn nutrition_table(recipe: &Recipe, rows: usize) -> String {
    let nutrients = recipe.nutrients();
    if nutrients.is_empty() {
        return NO_NUTRITION.to_string();
    }

    let header = ["Name", "Amount per Serving", "Unit", "Daily Value (%)"];
    let body: Vec<[String; 4]> = nutrients
        .iter()
        .take(rows)
        .map(|n| {
            [
                n.name.clone(),
                format_quantity(n.amount),
                n.unit.clone(),
                format_quantity(n.percent_of_daily_needs),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<w0$}  {:>w1$}  {:<w2$}  {:>w3$}",
        header[0], header[1], header[2], header[3],
        w0 = widths[0], w1 = widths[1], w2 = widths[2], w3 = widths[3]
    );
    for row in &body {
        let _ = writeln!(
            out,
            "{:<w0$}  {:>w1$}  {:<w2$}  {:>w3$}",
            row[0], row[1], row[2], row[3],
            w0 = widths[0], w1 = widths[1], w2 = widths[2], w3 = widths[3]
        );
    }
    out.trim_end().to_string()
}

pub fn recipe_card(recipe: &Recipe, converter: &CurrencyConverter, nutrition_rows: usize) -> String {
    if !recipe.has_details() {
        return NO_DETAILS.to_string();
    }

    let mut card = String::new();
    let _ = writeln!(card, "🍳 [{}] {}", recipe.id, recipe_heading(recipe, converter));
    let _ = writeln!(card, "⏱️ {}", timing_line(recipe));
    if let Some(image) = &recipe.image {
        let _ = writeln!(card, "🖼️ {}", image);
    }
    let _ = writeln!(card, "🔗 {}", source_line(recipe));
    let _ = writeln!(card, "\n🛒 Ingredients:\n{}", ingredients(recipe));
    let _ = writeln!(card, "\n📜 Instructions:\n{}", instructions(recipe));
    let _ = write!(card, "\n🍏 Nutrition Information:\n{}", nutrition_table(recipe, nutrition_rows));
    card
}

pub fn summary_line(summary: &RecipeSummary) -> String {
    let mut line = format!(
        "[{}] {}",
        summary.id,
        summary.title.as_deref().unwrap_or("Untitled recipe")
    );
    if let Some(minutes) = summary.ready_in_minutes {
        let _ = write!(line, " - ready in {} minutes", minutes);
    }
    if let Some(servings) = summary.servings {
        let _ = write!(line, ", serves {}", servings);
    }
    if let Some(url) = &summary.source_url {
        let _ = write!(line, " ({})", url);
    }
    line
}

fn measure(value: &Option<Measure>, fallback_unit: &str) -> String {
    match value {
        Some(m) => format!("{} {}", format_quantity(m.value), fallback_unit),
        None => "not available".to_string(),
    }
}

pub fn classification_summary(classification: &Classification) -> String {
    let Some(category) = &classification.category else {
        return NOT_CLASSIFIED.to_string();
    };

    let mut out = format!(
        "🧐 I think this is **{}** with a probability of {:.2}!",
        category.name, category.probability
    );
    if let Some(nutrition) = &classification.nutrition {
        let _ = write!(
            out,
            "\n\nNutrition Profile of {}\n- Calories: {}\n- Fat: {}\n- Protein: {}\n- Carbohydrates: {}",
            category.name,
            measure(&nutrition.calories, "kcal"),
            measure(&nutrition.fat, "g"),
            measure(&nutrition.protein, "g"),
            measure(&nutrition.carbs, "g"),
        );
    }
    out
}

pub fn grocery_table(list: &GroceryList) -> String {
    if list.is_empty() {
        return "No ingredients found in your favorite recipes.".to_string();
    }
    let name_width = list
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = format!("{:<width$}  {:>10}  Unit\n", "Name", "Amount", width = name_width);
    for item in list.iter() {
        let _ = writeln!(
            out,
            "{:<width$}  {:>10}  {}",
            item.name,
            format_quantity(item.amount),
            item.unit,
            width = name_width
        );
    }
    out.trim_end().to_string()
}

pub fn meal_plan_summary(plan: &MealPlan) -> String {
    if plan.is_empty() {
        return "You need to have favorite recipes to create a meal plan. Start adding some delicious dishes!"
            .to_string();
    }

    let mut out = format!(
        "📅 Your Meal Plan for {} Days (Saved: {})\n",
        plan.days(),
        euros(plan.saved_amount)
    );
    for entry in &plan.entries {
        let ready = entry
            .ready_in_minutes
            .map(|m| format!("{} minutes", m))
            .unwrap_or_else(|| "not available".to_string());
        let _ = write!(
            out,
            "\nDay {}\n  1. Recipe: {}\n  2. Ready Time: {}\n  3. Servings: {}\n  Source: {}\n",
            entry.day,
            entry.title,
            ready,
            entry.servings,
            entry.source_url.as_deref().unwrap_or("not available"),
        );
    }
    let _ = write!(
        out,
        "\nTotal Amount without Discount: {}\nTotal Amount with Discount: {}",
        euros(plan.total_cost),
        euros(plan.discounted_total)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::api::{FoodCategory, InstructionBlock, Nutrient, Nutrition, RecipeId, Step};
    use crate::food::planner::build_plan;

    fn pasta() -> Recipe {
        Recipe {
            id: RecipeId(11),
            title: Some("Pasta".into()),
            ready_in_minutes: Some(25),
            servings: Some(2),
            price_per_serving: Some(200.0),
            source_url: Some("https://example.com/pasta".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_quantity_trims_zeros() {
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(0.333333333), "0.333333");
        assert_eq!(format_quantity(120.25), "120.25");
    }

    #[test]
    fn test_heading_shows_euro_price() {
        let heading = recipe_heading(&pasta(), &CurrencyConverter::default());
        assert_eq!(heading, "Pasta (€1.70 Per Serving) 🍽️");
    }

    #[test]
    fn test_card_falls_back_per_field() {
        let card = recipe_card(&pasta(), &CurrencyConverter::default(), 9);
        assert!(card.contains(NO_INSTRUCTIONS));
        assert!(card.contains(NO_NUTRITION));
        assert!(card.contains("Source: Recipe (https://example.com/pasta)"));
        assert!(card.contains("Ready in 25 minutes. Servings: 2"));
    }

    #[test]
    fn test_card_without_title_is_not_found() {
        let recipe = Recipe { id: RecipeId(1), ..Default::default() };
        assert_eq!(recipe_card(&recipe, &CurrencyConverter::default(), 9), NO_DETAILS);
    }

    #[test]
    fn test_instructions_use_first_block() {
        let mut recipe = pasta();
        recipe.analyzed_instructions = vec![
            InstructionBlock {
                name: String::new(),
                steps: vec![
                    Step { number: 1, step: "Boil.".into() },
                    Step { number: 2, step: "Drain.".into() },
                ],
            },
            InstructionBlock {
                name: "Sauce".into(),
                steps: vec![Step { number: 1, step: "Stir.".into() }],
            },
        ];
        assert_eq!(instructions(&recipe), "1. Boil.\n2. Drain.");
    }

    #[test]
    fn test_nutrition_table_limits_rows() {
        let mut recipe = pasta();
        recipe.nutrition = Some(Nutrition {
            nutrients: (0..12)
                .map(|i| Nutrient {
                    name: format!("N{}", i),
                    amount: 1.5,
                    unit: "g".into(),
                    percent_of_daily_needs: 10.0,
                })
                .collect(),
        });
        let table = nutrition_table(&recipe, 9);
        assert_eq!(table.lines().count(), 10);
        assert!(table.contains("N8"));
        assert!(!table.contains("N9"));
        assert!(table.lines().nth(1).unwrap().contains("1.5"));
    }

    #[test]
    fn test_classification_summary() {
        let unclassified = Classification::default();
        assert_eq!(classification_summary(&unclassified), NOT_CLASSIFIED);

        let burger = Classification {
            category: Some(FoodCategory { name: "burger".into(), probability: 0.8871 }),
            ..Default::default()
        };
        assert_eq!(
            classification_summary(&burger),
            "🧐 I think this is **burger** with a probability of 0.89!"
        );
    }

    #[test]
    fn test_meal_plan_summary_mentions_savings() {
        let plan = build_plan(&[pasta()], &CurrencyConverter::default());
        let text = meal_plan_summary(&plan);
        assert!(text.starts_with("📅 Your Meal Plan for 1 Days (Saved: €0.82)"));
        assert!(text.contains("Ready Time: 25 minutes"));
        assert!(text.contains("Total Amount without Discount: €3.40"));
        assert!(text.contains("Total Amount with Discount: €2.58"));
    }
}
