use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::food::api::Recipe;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Combined ingredients of several recipes, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroceryList {
    items: Vec<GroceryItem>,
}

impl GroceryList {
    pub fn from_items(items: Vec<GroceryItem>) -> Self {
        Self { items }
    }

    pub fn get(&self, name: &str) -> Option<&GroceryItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroceryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

struct Tally {
    name: String,
    amount: Option<f64>,
    unit: Option<String>,
}

/// Sums ingredient amounts by name across `recipes`.
///
/// Units are not converted: the first unit seen for a name is kept and later
/// amounts are added to it as-is. A missing amount or unit is filled in by the
/// next occurrence that has one. Names whose amount or unit is still missing
/// after accumulation are left out of the result.
pub fn aggregate<'a, I>(recipes: I) -> GroceryList
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for recipe in recipes {
        for ingredient in &recipe.extended_ingredients {
            match index.get(&ingredient.name) {
                Some(&slot) => {
                    let tally = &mut tallies[slot];
                    tally.amount = match (tally.amount, ingredient.amount) {
                        (Some(stored), Some(extra)) => Some(stored + extra),
                        (stored, None) => stored,
                        (None, extra) => extra,
                    };
                    if tally.unit.is_none() {
                        tally.unit = ingredient.unit.clone();
                    }
                }
                None => {
                    index.insert(ingredient.name.clone(), tallies.len());
                    tallies.push(Tally {
                        name: ingredient.name.clone(),
                        amount: ingredient.amount,
                        unit: ingredient.unit.clone(),
                    });
                }
            }
        }
    }

    let items = tallies
        .into_iter()
        .filter_map(|tally| match (tally.amount, tally.unit) {
            (Some(amount), Some(unit)) => Some(GroceryItem {
                name: tally.name,
                amount,
                unit,
            }),
            _ => None,
        })
        .collect();

    GroceryList { items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::api::{Ingredient, RecipeId};

    fn recipe(id: u64, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: RecipeId(id),
            title: Some(format!("Recipe {}", id)),
            extended_ingredients: ingredients,
            ..Default::default()
        }
    }

    #[test]
    fn test_same_name_amounts_are_summed() {
        let recipes = vec![
            recipe(1, vec![Ingredient::new("egg", 2.0, "pc")]),
            recipe(2, vec![Ingredient::new("egg", 3.0, "pc")]),
        ];
        let list = aggregate(&recipes);
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.get("egg"),
            Some(&GroceryItem { name: "egg".into(), amount: 5.0, unit: "pc".into() })
        );
    }

    #[test]
    fn test_empty_input_gives_empty_list() {
        let recipes: Vec<Recipe> = Vec::new();
        assert!(aggregate(&recipes).is_empty());
    }

    #[test]
    fn test_missing_amount_is_dropped() {
        let mut salt = Ingredient::new("salt", 0.0, "pinch");
        salt.amount = None;
        let recipes = vec![recipe(1, vec![salt, Ingredient::new("flour", 200.0, "g")])];
        let list = aggregate(&recipes);
        assert!(list.get("salt").is_none());
        assert!(list.get("flour").is_some());
    }

    #[test]
    fn test_missing_unit_is_dropped_but_empty_unit_kept() {
        let mut oil = Ingredient::new("oil", 1.0, "");
        oil.unit = None;
        let recipes = vec![recipe(1, vec![oil, Ingredient::new("lemon", 1.0, "")])];
        let list = aggregate(&recipes);
        assert!(list.get("oil").is_none());
        assert_eq!(list.get("lemon").map(|i| i.unit.as_str()), Some(""));
    }

    #[test]
    fn test_first_unit_wins_without_conversion() {
        let recipes = vec![
            recipe(1, vec![Ingredient::new("milk", 1.0, "cup")]),
            recipe(2, vec![Ingredient::new("milk", 250.0, "ml")]),
        ];
        let milk = aggregate(&recipes).get("milk").cloned().unwrap();
        assert_eq!(milk.amount, 251.0);
        assert_eq!(milk.unit, "cup");
    }

    #[test]
    fn test_order_follows_first_occurrence() {
        let recipes = vec![
            recipe(1, vec![Ingredient::new("b", 1.0, "g"), Ingredient::new("a", 1.0, "g")]),
            recipe(2, vec![Ingredient::new("c", 1.0, "g"), Ingredient::new("b", 1.0, "g")]),
        ];
        let list = aggregate(&recipes);
        let names: Vec<&str> = list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_later_occurrence_fills_missing_unit() {
        let mut butter = Ingredient::new("butter", 50.0, "");
        butter.unit = None;
        let recipes = vec![
            recipe(1, vec![butter]),
            recipe(2, vec![Ingredient::new("butter", 25.0, "g")]),
        ];
        assert_eq!(
            aggregate(&recipes).get("butter"),
            Some(&GroceryItem { name: "butter".into(), amount: 75.0, unit: "g".into() })
        );
    }
}
