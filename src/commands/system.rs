use colored::Colorize;

use crate::food::favorites::FAVORITES_CAPACITY;
use crate::food::session::{MAX_READY_TIME, MIN_READY_TIME};

pub fn handle_command(input: &str) -> Result<(), String> {
    match input {
        "help" => {
            println!("\n🧙 Recipe Wizard:");
            println!("  time <minutes>          - Maximum ready time ({}-{})", MIN_READY_TIME, MAX_READY_TIME);
            println!("  search <ingredients>    - Find recipes, e.g. search chicken, tomato, basil");
            println!("  similar <id>            - Recipes similar to a recipe");
            println!("  open <id>               - Open a recipe's source in the browser");
            println!();

            println!("❤️ Chef's Favorites:");
            println!("  fav <id>                - Add a recipe (up to {})", FAVORITES_CAPACITY);
            println!("  unfav <id>              - Remove a recipe");
            println!("  favs                    - Show your favorite recipes");
            println!();

            println!("🛒 Magic Grocery List / 📅 Meal Master Planner:");
            println!("  grocery [file.csv]      - Combined ingredients of your favorites");
            println!("  plan [file.csv]         - Meal plan for up to 7 days with costs");
            println!();

            println!("📸 Food Selfie Classifier:");
            println!("  classify <image>        - Classify a jpg/png food picture");
            println!();

            println!("⚙️ System Commands:");
            println!("  about - Budget Bites, the start-up behind Lumine");
            println!("  help  - Show this help menu");
            println!("  exit  - Exit the program");
            println!();
            Ok(())
        }
        "exit" | "quit" => {
            println!("👋 {}", "Goodbye, Chef!".bright_yellow());
            std::process::exit(0);
        }
        _ => Err("Unknown system command. Type 'help' for available commands.".to_string()),
    }
}
