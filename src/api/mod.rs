//! HTTP front end. Every browser user gets a [`Session`] keyed by a session id.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Multipart, Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;
use validator::Validate;

use crate::about;
use crate::config::ServerConfig;
use crate::food::api::{Classification, Recipe, RecipeId, RecipeService, RecipeSummary, SpoonacularClient};
use crate::food::config::FoodConfig;
use crate::food::error::FoodError;
use crate::food::export;
use crate::food::favorites::AddOutcome;
use crate::food::grocery::GroceryList;
use crate::food::planner::MealPlan;
use crate::food::session::{ClassificationReport, SearchHit, Session, DEFAULT_READY_TIME};

/// Builds the remote client for a freshly submitted API key.
pub type ServiceFactory =
    Arc<dyn Fn(&str) -> Result<Arc<dyn RecipeService>, FoodError> + Send + Sync>;

type SharedSession = Arc<Mutex<Session>>;

#[derive(Clone)]
pub struct AppState {
    sessions: Arc<Mutex<LruCache<Uuid, SharedSession>>>,
    food: FoodConfig,
    server: ServerConfig,
    factory: ServiceFactory,
}

impl AppState {
    pub fn new(food: FoodConfig, server: ServerConfig, factory: ServiceFactory) -> Self {
        let capacity = NonZeroUsize::new(server.max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Arc::new(Mutex::new(LruCache::new(capacity))),
            food,
            server,
            factory,
        }
    }

    /// State whose sessions talk to Spoonacular.
    pub fn spoonacular(food: FoodConfig, server: ServerConfig) -> Self {
        let base_url = food.base_url.clone();
        let factory: ServiceFactory = Arc::new(move |api_key: &str| {
            let client = SpoonacularClient::new(api_key.to_string(), &base_url)?;
            Ok(Arc::new(client) as Arc<dyn RecipeService>)
        });
        Self::new(food, server, factory)
    }

    async fn session(&self, id: Uuid) -> Result<SharedSession, ApiError> {
        // Only held long enough to clone the handle; remote calls happen under
        // the per-session lock.
        let mut sessions = self.sessions.lock().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, format!("Unknown session {}", id)))
    }
}

#[derive(Serialize)]
struct ApiResponse {
    status: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<FoodError> for ApiError {
    fn from(e: FoodError) -> Self {
        let status = match &e {
            FoodError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            FoodError::QuotaExhausted => StatusCode::TOO_MANY_REQUESTS,
            FoodError::UnsupportedImage(_) | FoodError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FoodError::Request(_) | FoodError::Status { .. } | FoodError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            FoodError::Io(_) | FoodError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log::error!("Request failed: {}", e);
        }
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse { status: self.message })).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// `Json` body whose rejections answer with the usual `{status}` body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
struct ApiJson<T>(T);

/// `Path` whose rejections answer with the usual `{status}` body.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
struct ApiPath<T>(T);

#[derive(FromRequest)]
#[from_request(rejection(ApiError))]
struct ApiMultipart(Multipart);

#[derive(Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 200))]
    api_key: String,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    session_id: Uuid,
    quota_used: f64,
    quota_remaining: f64,
    created_at: DateTime<Utc>,
}

fn default_ready_time() -> u32 {
    DEFAULT_READY_TIME
}

#[derive(Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 500))]
    ingredients: String,
    #[serde(default = "default_ready_time")]
    #[validate(range(min = 10, max = 120))]
    max_ready_time: u32,
}

#[derive(Serialize)]
struct RecipeCard {
    #[serde(flatten)]
    recipe: Recipe,
    #[serde(rename = "pricePerServingEur")]
    price_per_serving_eur: f64,
}

#[derive(Serialize)]
struct HitsResponse {
    recipes: Vec<RecipeCard>,
    missing: Vec<RecipeId>,
}

#[derive(Serialize)]
struct ClassifyResponse {
    #[serde(flatten)]
    classification: Classification,
    matches: HitsResponse,
}

#[derive(Serialize)]
struct FavoritesResponse {
    favorites: Vec<RecipeId>,
}

#[derive(Serialize)]
struct AddFavoriteResponse {
    outcome: AddOutcome,
    favorites: Vec<RecipeId>,
}

#[derive(Serialize)]
struct RemoveFavoriteResponse {
    removed: bool,
    favorites: Vec<RecipeId>,
}

/// Create and configure the API router
pub fn create_api(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(state.server.cors_max_age);

    Router::new()
        .route("/health", get(health_check))
        .route("/about", get(about_handler))
        .route("/sessions", post(create_session))
        .route("/sessions/:id/search", post(search_handler))
        .route("/sessions/:id/favorites", get(list_favorites))
        .route(
            "/sessions/:id/favorites/:recipe_id",
            put(add_favorite).delete(remove_favorite),
        )
        .route("/sessions/:id/grocery-list", get(grocery_handler))
        .route("/sessions/:id/grocery-list.csv", get(grocery_csv_handler))
        .route("/sessions/:id/meal-plan", get(meal_plan_handler))
        .route("/sessions/:id/meal-plan.csv", get(meal_plan_csv_handler))
        .route("/sessions/:id/recipes/:recipe_id/similar", get(similar_handler))
        .route("/sessions/:id/classify", post(classify_handler))
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse> {
    Json(ApiResponse {
        status: "ok".to_string(),
    })
}

async fn about_handler(State(state): State<AppState>) -> Json<about::AboutPage> {
    Json(about::page(&state.food.video_path))
}

async fn create_session(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSessionRequest>,
) -> ApiResult<(StatusCode, Json<CreateSessionResponse>)> {
    request
        .validate()
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;

    let service = (state.factory)(request.api_key.trim())?;
    let (session, status) = Session::open(service, state.food.clone()).await?;

    let session_id = Uuid::new_v4();
    let upload = state.server.upload_dir.join(format!("{}.jpg", session_id));
    let session = session.with_temp_image(upload);
    let created_at = session.created_at();

    let evicted = state
        .sessions
        .lock()
        .await
        .push(session_id, Arc::new(Mutex::new(session)));
    if let Some((old_id, old)) = evicted {
        log::info!("Session limit reached, dropped session {}", old_id);
        old.lock().await.discard_staged_image().await;
    }
    log::info!("Opened session {}", session_id);

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            quota_used: status.quota_used,
            quota_remaining: status.quota_remaining,
            created_at,
        }),
    ))
}

fn hits_response(hits: Vec<SearchHit>, session: &Session) -> HitsResponse {
    let mut response = HitsResponse {
        recipes: Vec::new(),
        missing: Vec::new(),
    };
    for hit in hits {
        match hit {
            SearchHit::Found(recipe) => {
                let price = session
                    .converter()
                    .per_serving(recipe.price_per_serving.unwrap_or(0.0));
                response.recipes.push(RecipeCard {
                    recipe,
                    price_per_serving_eur: (price * 100.0).round() / 100.0,
                });
            }
            SearchHit::Missing { id } => response.missing.push(id),
        }
    }
    response
}

async fn search_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> ApiResult<Json<HitsResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;

    let session = state.session(id).await?;
    let mut session = session.lock().await;
    session.set_max_ready_time(request.max_ready_time)?;
    let hits = session.search(&request.ingredients).await?;
    Ok(Json(hits_response(hits, &session)))
}

async fn list_favorites(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<FavoritesResponse>> {
    let session = state.session(id).await?;
    let session = session.lock().await;
    Ok(Json(FavoritesResponse {
        favorites: session.favorite_ids().to_vec(),
    }))
}

async fn add_favorite(
    State(state): State<AppState>,
    ApiPath((id, recipe_id)): ApiPath<(Uuid, RecipeId)>,
) -> ApiResult<Response> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;
    let outcome = session.add_favorite(recipe_id);
    if outcome == AddOutcome::AtCapacity {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "Chef, you need to remove some of your favorite recipes!",
        ));
    }
    let status = match outcome {
        AddOutcome::Added => StatusCode::CREATED,
        _ => StatusCode::OK,
    };
    Ok((
        status,
        Json(AddFavoriteResponse {
            outcome,
            favorites: session.favorite_ids().to_vec(),
        }),
    )
        .into_response())
}

async fn remove_favorite(
    State(state): State<AppState>,
    ApiPath((id, recipe_id)): ApiPath<(Uuid, RecipeId)>,
) -> ApiResult<Json<RemoveFavoriteResponse>> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;
    let removed = session.remove_favorite(recipe_id);
    Ok(Json(RemoveFavoriteResponse {
        removed,
        favorites: session.favorite_ids().to_vec(),
    }))
}

async fn grocery_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<GroceryList>> {
    let session = state.session(id).await?;
    let session = session.lock().await;
    Ok(Json(session.grocery_list().await?))
}

fn csv_attachment(file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response()
}

async fn grocery_csv_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Response> {
    let session = state.session(id).await?;
    let session = session.lock().await;
    let list = session.grocery_list().await?;
    Ok(csv_attachment(export::GROCERY_FILE_NAME, export::grocery_csv(&list)?))
}

async fn meal_plan_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MealPlan>> {
    let session = state.session(id).await?;
    let session = session.lock().await;
    Ok(Json(session.meal_plan().await?))
}

async fn meal_plan_csv_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Response> {
    let session = state.session(id).await?;
    let session = session.lock().await;
    let plan = session.meal_plan().await?;
    Ok(csv_attachment(export::MEAL_PLAN_FILE_NAME, export::meal_plan_csv(&plan)?))
}

async fn similar_handler(
    State(state): State<AppState>,
    ApiPath((id, recipe_id)): ApiPath<(Uuid, RecipeId)>,
) -> ApiResult<Json<Vec<RecipeSummary>>> {
    let session = state.session(id).await?;
    let session = session.lock().await;
    Ok(Json(session.similar(recipe_id).await?))
}

async fn classify_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> ApiResult<Json<ClassifyResponse>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;
            upload = Some(bytes);
            break;
        }
    }
    let upload = upload
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Missing multipart field 'file'"))?;

    let session = state.session(id).await?;
    let session = session.lock().await;
    let ClassificationReport {
        classification,
        hits,
    } = session.classify(&upload).await?;

    Ok(Json(ClassifyResponse {
        classification,
        matches: hits_response(hits, &session),
    }))
}
