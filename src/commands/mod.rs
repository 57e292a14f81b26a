use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::food::session::Session;

mod about;
mod system;

pub mod food_cmd;

pub struct CommandHandler {
    session: Session,
}

impl CommandHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<(), String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command.to_lowercase().as_str() {
            "help" | "exit" | "quit" => system::handle_command(&command.to_lowercase()),
            "about" => {
                about::handle_command(&self.session.config().video_path);
                Ok(())
            }
            "time" | "search" | "fav" | "unfav" | "favs" | "grocery" | "plan" | "classify"
            | "similar" | "open" => food_cmd::handle_command(command, rest, &mut self.session).await,
            _ => Err(format!(
                "Unknown command '{}'. Type {} for available commands.",
                command,
                "help".cyan()
            )),
        }
    }
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub(crate) fn print_rule() {
    let width = term_size::dimensions().map(|(w, _)| w.min(100)).unwrap_or(60);
    println!("{}", "─".repeat(width).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::api::{
        Classification, KeyStatus, Recipe, RecipeId, RecipeService, RecipeSummary, SearchQuery,
    };
    use crate::food::config::FoodConfig;
    use crate::food::error::FoodError;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Arc;

    struct Offline;

    #[async_trait]
    impl RecipeService for Offline {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<RecipeSummary>, FoodError> {
            Ok(Vec::new())
        }

        async fn recipe_details(&self, id: RecipeId) -> Result<Recipe, FoodError> {
            Ok(Recipe { id, ..Default::default() })
        }

        async fn similar_recipes(&self, _id: RecipeId, _number: u32) -> Result<Vec<RecipeSummary>, FoodError> {
            Ok(Vec::new())
        }

        async fn classify_image(&self, _image: &Path) -> Result<Classification, FoodError> {
            Ok(Classification::default())
        }

        async fn validate_key(&self) -> Result<KeyStatus, FoodError> {
            Ok(KeyStatus {
                quota_used: 0.0,
                quota_remaining: 150.0,
            })
        }
    }

    fn handler() -> CommandHandler {
        CommandHandler::new(Session::new(Arc::new(Offline), FoodConfig::default()))
    }

    #[tokio::test]
    async fn test_unknown_command_is_an_error() {
        let mut handler = handler();
        assert!(handler.handle_command("bake cake").await.is_err());
        assert!(handler.handle_command("   ").await.is_ok());
    }

    #[tokio::test]
    async fn test_time_command_updates_session() {
        let mut handler = handler();
        handler.handle_command("TIME 60").await.unwrap();
        assert_eq!(handler.session().max_ready_time(), 60);

        assert!(handler.handle_command("time 5").await.is_err());
        assert!(handler.handle_command("time soon").await.is_err());
        assert_eq!(handler.session().max_ready_time(), 60);
    }

    #[tokio::test]
    async fn test_favorite_commands() {
        let mut handler = handler();
        handler.handle_command("fav 42").await.unwrap();
        handler.handle_command("fav 7").await.unwrap();
        handler.handle_command("unfav 42").await.unwrap();
        assert_eq!(handler.session().favorite_ids(), &[RecipeId(7)]);

        assert!(handler.handle_command("fav").await.is_err());
        assert!(handler.handle_command("fav pasta").await.is_err());
    }
}
