use colored::Colorize;
use std::path::Path;

use super::{print_rule, spinner};
use crate::food::api::{Recipe, RecipeId};
use crate::food::export;
use crate::food::favorites::AddOutcome;
use crate::food::render;
use crate::food::session::{SearchHit, Session};

pub async fn handle_command(command: &str, args: &str, session: &mut Session) -> Result<(), String> {
    match command.to_lowercase().as_str() {
        "time" => set_time(args, session),
        "search" => search(args, session).await,
        "fav" => add_favorite(args, session),
        "unfav" => remove_favorite(args, session),
        "favs" => show_favorites(session).await,
        "grocery" => grocery(args, session).await,
        "plan" => plan(args, session).await,
        "classify" => classify(args, session).await,
        "similar" => similar(args, session).await,
        "open" => open_source(args, session).await,
        _ => Err(format!("Unknown food command: {}", command)),
    }
}

fn parse_id(args: &str, usage: &str) -> Result<RecipeId, String> {
    if args.is_empty() {
        return Err(format!("Please specify a recipe id.\nUsage: {}", usage));
    }
    args.parse::<RecipeId>()
}

fn set_time(args: &str, session: &mut Session) -> Result<(), String> {
    if args.is_empty() {
        println!("⏱️ Maximum ready time: {} minutes", session.max_ready_time());
        println!("Usage: time <minutes>");
        return Ok(());
    }
    let minutes: u32 = args
        .parse()
        .map_err(|_| format!("'{}' is not a number of minutes", args))?;
    session.set_max_ready_time(minutes).map_err(|e| e.to_string())?;
    println!("⏱️ Recipes must be ready within {} minutes.", minutes.to_string().cyan());
    Ok(())
}

fn print_card(recipe: &Recipe, session: &Session) {
    let card = render::recipe_card(recipe, session.converter(), session.config().nutrition_rows);
    let mut lines = card.lines();
    if let Some(heading) = lines.next() {
        println!("{}", heading.bright_yellow().bold());
    }
    for line in lines {
        println!("{}", line);
    }
    print_rule();
}

fn print_hits(hits: &[SearchHit], session: &Session) {
    for hit in hits {
        match hit {
            SearchHit::Found(recipe) => print_card(recipe, session),
            SearchHit::Missing { id } => {
                println!("{} ({})", render::NO_DETAILS.yellow(), id);
                print_rule();
            }
        }
    }
}

async fn search(args: &str, session: &mut Session) -> Result<(), String> {
    if args.is_empty() {
        println!("Please specify the ingredients you have, separated by commas.");
        println!("Usage: search chicken, tomato, basil 🐔🍅🌿");
        return Ok(());
    }

    let pb = spinner("Whipping up some recipes...");
    let result = session.search(args).await;
    pb.finish_and_clear();
    let hits = result.map_err(|e| format!("Search failed: {}", e))?;

    if hits.is_empty() {
        println!("No recipes match those ingredients within {} minutes.", session.max_ready_time());
        return Ok(());
    }

    println!("\n{}\n", "Lumine's Recipe Picks 🍝".bright_green().bold());
    print_hits(&hits, session);
    println!("Save a dish with {} ❤️ or open its source with {} 🔗", "fav <id>".cyan(), "open <id>".cyan());
    Ok(())
}

fn add_favorite(args: &str, session: &mut Session) -> Result<(), String> {
    let id = parse_id(args, "fav <id>")?;
    match session.add_favorite(id) {
        AddOutcome::Added => {
            println!("🎉 Recipe Added! Hooray");
            println!("👨‍🍳 Check it out with {}", "favs".cyan());
        }
        AddOutcome::AlreadyPresent => println!("❤️ Recipe {} is already one of your favorites.", id),
        AddOutcome::AtCapacity => {
            println!("{}", "Chef, you need to remove some of your favorite recipes! 🍲".yellow())
        }
    }
    Ok(())
}

fn remove_favorite(args: &str, session: &mut Session) -> Result<(), String> {
    let id = parse_id(args, "unfav <id>")?;
    if session.remove_favorite(id) {
        println!("💔 Removed recipe {} from your favorites.", id);
    } else {
        println!("Recipe {} is not in your favorites.", id);
    }
    Ok(())
}

async fn show_favorites(session: &Session) -> Result<(), String> {
    if session.favorite_ids().is_empty() {
        println!("You have no favorite recipes yet. Start adding some delicious dishes!");
        return Ok(());
    }

    let pb = spinner("Fetching your favorites...");
    let result = session.favorite_recipes().await;
    pb.finish_and_clear();
    let recipes = result.map_err(|e| format!("Failed to load favorites: {}", e))?;

    println!("\n{}\n", "Chef's Favorites ❤️".bright_red().bold());
    for recipe in &recipes {
        print_card(recipe, session);
    }
    println!("Remove a dish with {} 💔", "unfav <id>".cyan());
    Ok(())
}

async fn grocery(args: &str, session: &Session) -> Result<(), String> {
    if session.favorite_ids().is_empty() {
        println!("You need to have favorite recipes to generate a grocery list. Start adding some delicious dishes!");
        return Ok(());
    }

    let pb = spinner("Conjuring your grocery list...");
    let result = session.grocery_list().await;
    pb.finish_and_clear();
    let list = result.map_err(|e| format!("Failed to build grocery list: {}", e))?;

    println!("\n{}\n", "Magic Grocery List 🛒".bright_green().bold());
    println!("{}", render::grocery_table(&list));

    if !args.is_empty() && !list.is_empty() {
        let bytes = export::grocery_csv(&list).map_err(|e| e.to_string())?;
        export::save(Path::new(args), &bytes).map_err(|e| format!("Failed to save {}: {}", args, e))?;
        println!("\n📥 Grocery list saved to {}", args.cyan());
    }
    Ok(())
}

async fn plan(args: &str, session: &Session) -> Result<(), String> {
    if session.favorite_ids().is_empty() {
        println!("You need to have favorite recipes to create a meal plan. Start adding some delicious dishes!");
        return Ok(());
    }

    let pb = spinner("Orchestrating your meals...");
    let result = session.meal_plan().await;
    pb.finish_and_clear();
    let plan = result.map_err(|e| format!("Failed to build meal plan: {}", e))?;

    println!("\n{}", render::meal_plan_summary(&plan));

    if !args.is_empty() && !plan.is_empty() {
        let bytes = export::meal_plan_csv(&plan).map_err(|e| e.to_string())?;
        export::save(Path::new(args), &bytes).map_err(|e| format!("Failed to save {}: {}", args, e))?;
        println!("\n📥 Meal plan saved to {}", args.cyan());
    }
    Ok(())
}

async fn classify(args: &str, session: &Session) -> Result<(), String> {
    if args.is_empty() {
        println!("Please give the path of a jpg, jpeg or png food picture.");
        println!("Usage: classify <image>");
        return Ok(());
    }

    let pb = spinner("Analyzing image...");
    let result = session.classify_file(Path::new(args)).await;
    pb.finish_and_clear();
    let report = result.map_err(|e| format!("Classification failed: {}", e))?;

    println!("\n{}", render::classification_summary(&report.classification));
    if let Some(category) = &report.classification.category {
        if !report.hits.is_empty() {
            println!(
                "\n{}\n",
                format!("Here are some delicious recipes that match the image: {}!", category.name)
                    .bright_green()
                    .bold()
            );
            print_hits(&report.hits, session);
        }
    }
    Ok(())
}

async fn similar(args: &str, session: &Session) -> Result<(), String> {
    let id = parse_id(args, "similar <id>")?;

    let pb = spinner("Looking for similar recipes...");
    let result = session.similar(id).await;
    pb.finish_and_clear();
    let similar = result.map_err(|e| format!("Failed to fetch similar recipes: {}", e))?;

    if similar.is_empty() {
        println!("No similar recipes found for {}.", id);
        return Ok(());
    }
    println!("\n🍲 Recipes similar to {}:", id);
    for summary in &similar {
        println!("  • {}", render::summary_line(summary));
    }
    Ok(())
}

async fn open_source(args: &str, session: &Session) -> Result<(), String> {
    let id = parse_id(args, "open <id>")?;
    let recipe = session
        .find_recipe(id)
        .await
        .map_err(|e| format!("Failed to look up recipe {}: {}", id, e))?;

    let url = recipe
        .source_url
        .ok_or_else(|| format!("Recipe {} has no source link.", id))?;
    webbrowser::open(&url).map_err(|e| format!("Failed to open {}: {}", url, e))?;
    println!("🔗 Opened {}", url.cyan());
    Ok(())
}
