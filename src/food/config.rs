use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::food::currency::USD_TO_EUR_RATE;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

#[derive(Debug, Clone)]
pub struct FoodConfig {
    pub base_url: String,
    pub eur_rate: f64,
    pub search_results: u32,
    pub similar_results: u32,
    pub classify_recipes: usize,
    pub nutrition_rows: usize,
    pub temp_image: PathBuf,
    pub video_path: PathBuf,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            eur_rate: USD_TO_EUR_RATE,
            search_results: 3,
            similar_results: 5,
            classify_recipes: 3,
            nutrition_rows: 9,
            temp_image: PathBuf::from("temp_classify_image.jpg"),
            video_path: PathBuf::from("Video.mp4"),
        }
    }
}

impl FoodConfig {
    /// Defaults overridden by whatever is set in the environment. The API key
    /// is never read from here; it belongs to the session.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        Ok(Self {
            base_url: env::var("SPOONACULAR_BASE_URL").unwrap_or(defaults.base_url),
            eur_rate: parse_var("LUMINE_EUR_RATE")?.unwrap_or(defaults.eur_rate),
            search_results: parse_var("LUMINE_SEARCH_RESULTS")?.unwrap_or(defaults.search_results),
            similar_results: parse_var("LUMINE_SIMILAR_RESULTS")?.unwrap_or(defaults.similar_results),
            classify_recipes: parse_var("LUMINE_CLASSIFY_RECIPES")?.unwrap_or(defaults.classify_recipes),
            nutrition_rows: defaults.nutrition_rows,
            temp_image: env::var("LUMINE_TEMP_IMAGE")
                .map(PathBuf::from)
                .unwrap_or(defaults.temp_image),
            video_path: env::var("LUMINE_VIDEO_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_path),
        })
    }
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, String> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(None),
    }
}
