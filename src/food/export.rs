use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

use crate::food::error::FoodError;
use crate::food::grocery::{GroceryItem, GroceryList};
use crate::food::planner::MealPlan;
use crate::food::render::format_quantity;

pub const GROCERY_FILE_NAME: &str = "grocery_list.csv";
pub const MEAL_PLAN_FILE_NAME: &str = "meal_plan.csv";

#[derive(Debug, Serialize, Deserialize)]
struct GroceryRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Unit")]
    unit: String,
}

#[derive(Debug, Serialize)]
struct MealPlanRow<'a> {
    #[serde(rename = "Day")]
    day: String,
    #[serde(rename = "Recipe")]
    recipe: &'a str,
    #[serde(rename = "Ready Time")]
    ready_time: String,
    #[serde(rename = "Servings")]
    servings: u32,
    #[serde(rename = "Source")]
    source: &'a str,
}

pub fn write_grocery_csv<W: Write>(list: &GroceryList, writer: W) -> Result<(), FoodError> {
    let mut csv = csv::Writer::from_writer(writer);
    for item in list.iter() {
        csv.serialize(GroceryRow {
            name: item.name.clone(),
            amount: format_quantity(item.amount),
            unit: item.unit.clone(),
        })?;
    }
    if list.is_empty() {
        csv.write_record(["Name", "Amount", "Unit"])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn grocery_csv(list: &GroceryList) -> Result<Vec<u8>, FoodError> {
    let mut buf = Vec::new();
    write_grocery_csv(list, &mut buf)?;
    Ok(buf)
}

/// Parses a file produced by [`write_grocery_csv`].
pub fn read_grocery_csv<R: Read>(reader: R) -> Result<GroceryList, FoodError> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut items = Vec::new();
    for row in csv.deserialize::<GroceryRow>() {
        let row = row?;
        let amount = row
            .amount
            .trim()
            .parse::<f64>()
            .map_err(|_| FoodError::Decode(format!("bad amount '{}' for {}", row.amount, row.name)))?;
        items.push(GroceryItem {
            name: row.name,
            amount,
            unit: row.unit,
        });
    }
    Ok(GroceryList::from_items(items))
}

pub fn write_meal_plan_csv<W: Write>(plan: &MealPlan, writer: W) -> Result<(), FoodError> {
    let mut csv = csv::Writer::from_writer(writer);
    for entry in &plan.entries {
        csv.serialize(MealPlanRow {
            day: format!("Day {}", entry.day),
            recipe: &entry.title,
            ready_time: entry
                .ready_in_minutes
                .map(|m| format!("{} minutes", m))
                .unwrap_or_default(),
            servings: entry.servings,
            source: entry.source_url.as_deref().unwrap_or(""),
        })?;
    }
    if plan.is_empty() {
        csv.write_record(["Day", "Recipe", "Ready Time", "Servings", "Source"])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn meal_plan_csv(plan: &MealPlan) -> Result<Vec<u8>, FoodError> {
    let mut buf = Vec::new();
    write_meal_plan_csv(plan, &mut buf)?;
    Ok(buf)
}

pub fn save(path: &Path, bytes: &[u8]) -> Result<(), FoodError> {
    std::fs::write(path, bytes)?;
    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::api::{Recipe, RecipeId};
    use crate::food::currency::CurrencyConverter;
    use crate::food::planner::build_plan;

    fn list() -> GroceryList {
        GroceryList::from_items(vec![
            GroceryItem { name: "egg".into(), amount: 5.0, unit: "pc".into() },
            GroceryItem { name: "olive oil, extra virgin".into(), amount: 2.5, unit: "tbsp".into() },
            GroceryItem { name: "lemon".into(), amount: 1.0 / 3.0, unit: "".into() },
        ])
    }

    #[test]
    fn test_grocery_csv_layout() {
        let text = String::from_utf8(grocery_csv(&list()).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name,Amount,Unit");
        assert_eq!(lines[1], "egg,5,pc");
        assert_eq!(lines[2], "\"olive oil, extra virgin\",2.5,tbsp");
        assert_eq!(lines[3], "lemon,0.333333,");
    }

    #[test]
    fn test_grocery_csv_round_trip() {
        let original = list();
        let parsed = read_grocery_csv(grocery_csv(&original).unwrap().as_slice()).unwrap();
        assert_eq!(parsed.len(), original.len());
        for (a, b) in original.iter().zip(parsed.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.unit, b.unit);
            assert!((a.amount - b.amount).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_grocery_csv_keeps_header() {
        let bytes = grocery_csv(&GroceryList::default()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Name,Amount,Unit\n");
        assert!(read_grocery_csv("Name,Amount,Unit\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_bad_amount_is_rejected() {
        let err = read_grocery_csv("Name,Amount,Unit\negg,lots,pc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FoodError::Decode(_)));
    }

    #[test]
    fn test_meal_plan_csv_layout() {
        let recipe = Recipe {
            id: RecipeId(1),
            title: Some("Soup".into()),
            ready_in_minutes: Some(30),
            servings: Some(4),
            source_url: Some("https://example.com/soup".into()),
            ..Default::default()
        };
        let plan = build_plan(&[recipe], &CurrencyConverter::default());
        let text = String::from_utf8(meal_plan_csv(&plan).unwrap()).unwrap();
        assert_eq!(
            text,
            "Day,Recipe,Ready Time,Servings,Source\nDay 1,Soup,30 minutes,4,https://example.com/soup\n"
        );
    }
}
