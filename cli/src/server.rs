#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use metrum::{display_units, Diagnostic, DimensionVector, Engine, InlineRenderer, MetrumError};
    use serde::{Deserialize, Serialize};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower_http::cors::CorsLayer;
    use tracing::{error, info};

    type SharedEngine = Arc<RwLock<Engine>>;

    #[derive(Debug, Deserialize)]
    struct ParseRequest {
        source: String,
    }

    #[derive(Debug, Serialize)]
    struct ParseResponse {
        source: String,
        units: DimensionVector,
        display: String,
    }

    #[derive(Debug, Deserialize)]
    struct CheckRequest {
        left: String,
        right: String,
    }

    #[derive(Debug, Serialize)]
    struct CheckResponse {
        equivalent: bool,
        left: String,
        right: String,
    }

    #[derive(Debug, Serialize)]
    struct UnitsResponse {
        units: usize,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        diagnostics: Vec<Diagnostic>,
    }

    type ApiError = (StatusCode, Json<ErrorResponse>);

    fn api_error(error: MetrumError) -> ApiError {
        let status = match &error {
            MetrumError::Units(_) | MetrumError::UnitsMismatch { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            MetrumError::ResourceLimitExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        let diagnostics = error
            .formatted()
            .map(|details| details.diagnostics.clone())
            .unwrap_or_default();
        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                diagnostics,
            }),
        )
    }

    pub fn router(engine: Engine) -> Router {
        let shared_engine = Arc::new(RwLock::new(engine));

        Router::new()
            .route("/health", get(health_check))
            .route("/parse", post(parse))
            .route("/check", post(check))
            .route("/units", post(add_units))
            .layer(CorsLayer::permissive())
            .with_state(shared_engine)
    }

    pub async fn start_server(engine: Engine, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(engine);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Metrum server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "metrum",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn parse(
        State(engine): State<SharedEngine>,
        Json(payload): Json<ParseRequest>,
    ) -> Result<Json<ParseResponse>, ApiError> {
        let engine = engine.read().await;

        let units = engine
            .render_with(&InlineRenderer::plain(), &payload.source)
            .map_err(|e| {
                error!("Parse failed: {}", e);
                api_error(e)
            })?;

        info!("Parsed '{}'", payload.source);

        Ok(Json(ParseResponse {
            display: display_units(&units),
            source: payload.source,
            units,
        }))
    }

    async fn check(
        State(engine): State<SharedEngine>,
        Json(payload): Json<CheckRequest>,
    ) -> Result<Json<CheckResponse>, ApiError> {
        let engine = engine.read().await;

        let left = engine.parse_units(&payload.left).map_err(api_error)?;
        let right = engine.parse_units(&payload.right).map_err(api_error)?;

        info!("Checked '{}' against '{}'", payload.left, payload.right);

        Ok(Json(CheckResponse {
            equivalent: left == right,
            left: display_units(&left),
            right: display_units(&right),
        }))
    }

    async fn add_units(
        State(engine): State<SharedEngine>,
        body: String,
    ) -> Result<Json<UnitsResponse>, ApiError> {
        let mut engine = engine.write().await;

        engine.add_unit_system_json(&body).map_err(|e| {
            error!("Failed to load unit system: {}", e);
            api_error(e)
        })?;

        info!("Unit system now has {} unit(s)", engine.unit_system().len());

        Ok(Json(UnitsResponse {
            units: engine.unit_system().len(),
        }))
    }

}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(
        _engine: metrum::Engine,
        _host: &str,
        _port: u16,
    ) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}
