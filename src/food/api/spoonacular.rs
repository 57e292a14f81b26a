use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::path::Path;
use url::Url;

use super::models::{
    Classification, KeyStatus, Recipe, RecipeId, RecipeSummary, SearchQuery, SearchResponse,
};
use super::RecipeService;
use crate::food::config::FoodConfig;
use crate::food::error::FoodError;

const QUOTA_USED_HEADER: &str = "x-api-quota-used";
const QUOTA_REMAINING_HEADER: &str = "x-api-quota-remaining";
/// Free-plan allowance, assumed when the probe response carries no quota headers.
const DEFAULT_QUOTA_REMAINING: f64 = 150.0;

#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    api_key: String,
    base_url: Url,
    client: Client,
}

impl SpoonacularClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, FoodError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| FoodError::InvalidInput(format!("bad base URL '{}': {}", base_url, e)))?;
        // Url::join drops the last path segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            api_key,
            base_url,
            client: Client::new(),
        })
    }

    pub fn from_config(api_key: String, config: &FoodConfig) -> Result<Self, FoodError> {
        Self::new(api_key, &config.base_url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, FoodError> {
        self.base_url
            .join(path)
            .map_err(|e| FoodError::InvalidInput(format!("bad endpoint '{}': {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, FoodError> {
        let url = self.endpoint(path)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        decode(response).await
    }
}

#[async_trait]
impl RecipeService for SpoonacularClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>, FoodError> {
        let params = vec![
            ("includeIngredients", query.ingredients.clone()),
            ("maxReadyTime", query.max_ready_time.to_string()),
            ("number", query.number.to_string()),
            ("instructionsRequired", "true".to_string()),
            ("addRecipeInformation", "true".to_string()),
        ];

        let response: SearchResponse = self.get_json("recipes/complexSearch", &params).await?;
        log::info!(
            "Search for '{}' within {} minutes returned {} recipes",
            query.ingredients,
            query.max_ready_time,
            response.results.len()
        );
        Ok(response.results)
    }

    async fn recipe_details(&self, id: RecipeId) -> Result<Recipe, FoodError> {
        let path = format!("recipes/{}/information", id);
        self.get_json(&path, &[("includeNutrition", "true".to_string())])
            .await
    }

    async fn similar_recipes(&self, id: RecipeId, number: u32) -> Result<Vec<RecipeSummary>, FoodError> {
        let path = format!("recipes/{}/similar", id);
        self.get_json(&path, &[("number", number.to_string())]).await
    }

    async fn classify_image(&self, image: &Path) -> Result<Classification, FoodError> {
        let bytes = tokio::fs::read(image).await?;
        let file_name = image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".to_string());
        let mime = image_mime(&bytes);
        log::info!("Uploading {} ({} bytes, {}) for analysis", file_name, bytes.len(), mime);

        let part = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("food/images/analyze")?)
            .query(&[("apiKey", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;

        decode(response).await
    }

    async fn validate_key(&self) -> Result<KeyStatus, FoodError> {
        let response = self
            .client
            .get(self.endpoint("recipes/complexSearch")?)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!("Key validation probe failed with status {}", response.status());
            return Err(FoodError::InvalidApiKey);
        }

        let status = quota_from_headers(response.headers());
        log::info!(
            "API key accepted, quota used {} / remaining {}",
            status.quota_used,
            status.quota_remaining
        );
        if status.quota_remaining <= 0.0 {
            return Err(FoodError::QuotaExhausted);
        }
        Ok(status)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FoodError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| FoodError::Decode(e.to_string()))
}

fn status_error(status: StatusCode, body: &str) -> FoodError {
    match status {
        StatusCode::UNAUTHORIZED => FoodError::InvalidApiKey,
        // Spoonacular answers 402 once the daily points are spent.
        StatusCode::PAYMENT_REQUIRED => FoodError::QuotaExhausted,
        _ => {
            let message = serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| body.chars().take(200).collect());
            log::warn!("Spoonacular returned {}: {}", status, message);
            FoodError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }
}

fn quota_from_headers(headers: &HeaderMap) -> KeyStatus {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<f64>().ok())
    };

    KeyStatus {
        quota_used: read(QUOTA_USED_HEADER).unwrap_or(0.0),
        quota_remaining: read(QUOTA_REMAINING_HEADER).unwrap_or(DEFAULT_QUOTA_REMAINING),
    }
}

fn image_mime(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => "image/png",
        _ => "image/jpeg",
    }
}
