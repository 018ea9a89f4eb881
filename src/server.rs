use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, Request, State};
use axum::http::header::HeaderValue;
use axum::http::{HeaderName, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::corpus::CorpusStore;
use crate::game::{self, GameError};
use crate::models::Verse;
use crate::plan;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
struct AppState {
    config: Arc<AppConfig>,
    corpus: Arc<CorpusStore>,
}

pub async fn run_server(config: AppConfig, corpus: CorpusStore) -> Result<()> {
    let state = AppState {
        config: Arc::new(config),
        corpus: Arc::new(corpus),
    };

    let cors = cors_layer(&state.config)?;

    let app = Router::new()
        .route("/api/bible-game/random-verse", get(random_verse))
        .route("/api/bible-game/expand-verse", get(expand_verse))
        .route("/api/bible-reading-plan", get(reading_plan))
        .route("/api/hello/:user_name", get(hello))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state.clone());

    let addr: SocketAddr = state.config.bind_addr.parse()?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
        ]))
}

async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !api_key_matches(provided, &state.config.api_secret) {
        tracing::warn!(
            "invalid or missing API key for request: {}",
            request.uri().path()
        );
        return ApiError::unauthorized("invalid or missing API key").into_response();
    }

    next.run(request).await
}

fn api_key_matches(provided: Option<&str>, secret: &str) -> bool {
    provided == Some(secret)
}

#[derive(Debug, Deserialize)]
struct RandomVerseParams {
    books: String,
}

async fn random_verse(
    State(state): State<AppState>,
    Query(params): Query<RandomVerseParams>,
) -> Result<Json<Verse>, ApiError> {
    let selected_books: HashSet<String> = params
        .books
        .split(',')
        .map(str::trim)
        .filter(|book| !book.is_empty())
        .map(str::to_string)
        .collect();

    if selected_books.is_empty() {
        return Err(ApiError::bad_request("no books selected".to_string()));
    }

    let mut rng = rand::thread_rng();
    let verse = game::random_verse(&state.corpus, &selected_books, &mut rng)?;

    tracing::info!(
        "generated random verse: {} for books: {:?}",
        verse.reference,
        selected_books
    );
    Ok(Json(verse))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandVerseParams {
    book: String,
    chapter: u32,
    from_verse: u32,
    to_verse: u32,
}

async fn expand_verse(
    State(state): State<AppState>,
    Query(params): Query<ExpandVerseParams>,
) -> Result<Json<Verse>, ApiError> {
    if params.from_verse == 0 || params.from_verse > params.to_verse {
        return Err(ApiError::bad_request(format!(
            "invalid verse range {}-{}",
            params.from_verse, params.to_verse
        )));
    }

    let verse = game::expand_verse(
        &state.corpus,
        &params.book,
        params.chapter,
        params.from_verse,
        params.to_verse,
    )?;

    tracing::info!(
        "expanded verse range for {} {}:{}-{} to include verse {}",
        params.book,
        params.chapter,
        params.from_verse,
        params.to_verse,
        verse.verse_number
    );
    Ok(Json(verse))
}

async fn reading_plan() -> Json<Vec<&'static str>> {
    let mut rng = rand::thread_rng();
    let ordered = plan::ordered_reading_plan(&mut rng);
    Json(ordered.into_iter().map(|book| book.name).collect())
}

async fn hello(Path(user_name): Path<String>) -> String {
    tracing::info!("hello endpoint called for user: {}", user_name);
    format!("Hello {}, I am the Backend", user_name)
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
    }
}

impl From<GameError> for ApiError {
    fn from(value: GameError) -> Self {
        let status = match value {
            GameError::InvalidInput(_) | GameError::NoExpansionPossible(_) => {
                StatusCode::BAD_REQUEST
            }
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::DataIntegrity(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: value.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_must_match_the_configured_secret() {
        assert!(api_key_matches(Some("s3cret"), "s3cret"));
        assert!(!api_key_matches(Some("wrong"), "s3cret"));
        assert!(!api_key_matches(Some(""), "s3cret"));
        assert!(!api_key_matches(None, "s3cret"));
    }

    #[test]
    fn game_errors_map_to_http_statuses() {
        let cases = [
            (
                GameError::InvalidInput("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (GameError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (
                GameError::NoExpansionPossible("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                GameError::DataIntegrity("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status, expected);
        }
    }
}
