use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use dealerprice_db::{schema::dealers_table_exists, DbPool};
use serde::Serialize;
use tracing::warn;

#[derive(Clone)]
pub struct HealthState {
    db_pool: DbPool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(db_pool: DbPool) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { db_pool })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = database_check(&state.db_pool).await;
    let catalog = catalog_check(&state.db_pool).await;
    let ready = database.status == "ready" && catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        database,
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn database_check(pool: &DbPool) -> HealthCheck {
    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await {
        Ok(_) => HealthCheck { status: "ready", detail: "database query succeeded".to_string() },
        Err(error) => {
            warn!(
                event_name = "http.health.database_failed",
                correlation_id = "health",
                error = %error,
                "health database probe failed"
            );
            HealthCheck { status: "degraded", detail: "database query failed".to_string() }
        }
    }
}

async fn catalog_check(pool: &DbPool) -> HealthCheck {
    match dealers_table_exists(pool).await {
        Ok(true) => HealthCheck { status: "ready", detail: "dealers table present".to_string() },
        Ok(false) => {
            HealthCheck { status: "degraded", detail: "dealers table missing".to_string() }
        }
        Err(error) => {
            warn!(
                event_name = "http.health.catalog_failed",
                correlation_id = "health",
                error = %error,
                "health catalog probe failed"
            );
            HealthCheck { status: "degraded", detail: "catalog check failed".to_string() }
        }
    }
}
