use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::Error;
use crate::graph::GraphData;
use crate::Ogre;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// `/health` answers liveness probes; every other path extracts `?url=`.
pub fn router(ogre: Arc<Ogre>) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(extract)
        .with_state(ogre)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "ogre".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Pairs are kept as a list so repeated keys never reject the request; the
/// first `url` wins.
async fn extract(State(ogre): State<Arc<Ogre>>, Query(params): Query<Vec<(String, String)>>) -> Result<Json<GraphData>, Error> {
    let url = params
        .into_iter()
        .find_map(|(k, v)| (k == "url").then_some(v))
        .filter(|u| !u.is_empty())
        .ok_or(Error::MissingUrl)?;
    let span = info_span!("extract", request_id = %Uuid::new_v4(), url = %url);
    async {
        let data = ogre.extract(&url).await.inspect_err(|e| warn!("extraction failed: {}", e))?;
        Ok::<_, Error>(Json(data))
    }
    .instrument(span)
    .await
}
