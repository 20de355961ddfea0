use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::scores::models::ScoreRecord;
use crate::scores::store::{ScoreStore, StoreError};
use crate::scores::validate::{parse_level_param, parse_score_body};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ScoreStore>,
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

async fn list_scores(State(state): State<AppState>) -> ApiResult<Json<Vec<ScoreRecord>>> {
    let scores = state.store.all().map_err(map_store_err)?;
    Ok(Json(scores))
}

async fn level_scores(State(state): State<AppState>, Path(level): Path<String>) -> ApiResult<Json<Vec<ScoreRecord>>> {
    let Some(level) = parse_level_param(&level) else {
        return Ok(Json(Vec::new()));
    };
    let scores = state.store.by_level(level).map_err(map_store_err)?;
    Ok(Json(scores))
}

async fn create_score(State(state): State<AppState>, body: Bytes) -> ApiResult<(StatusCode, Json<ScoreRecord>)> {
    let score = parse_score_body(&body).map_err(|err| {
        info!(%err, "rejected score submission");
        (StatusCode::BAD_REQUEST, err.to_string())
    })?;
    let record = state.store.insert(score).map_err(map_store_err)?;
    info!(id = %record.id, name = %record.name, score = %record.score, level = %record.level, "score created");
    Ok((StatusCode::CREATED, Json(record)))
}

fn map_store_err(err: StoreError) -> (StatusCode, String) {
    warn!(%err, "score storage failed");
    (StatusCode::BAD_REQUEST, err.to_string())
}

pub fn make_app(store: Arc<dyn ScoreStore>) -> Router {
    let state = AppState { store };
    Router::new()
        .route("/api/scores", get(list_scores).post(create_score))
        .route("/api/scores/:level", get(level_scores))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, store: Arc<dyn ScoreStore>) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("score service listening on http://{}", listener.local_addr()?);
    axum::serve(listener, make_app(store))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
}
