//! Customer Churn Prediction Server
//!
//! Serves the churn prediction panel as a JSON API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CHURN PREDICTION SERVER                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────────────────────┐   │
//! │  │  API      │──►│  ChurnPredictor (churn-core)         │   │
//! │  │  (Axum)   │   │  encoder → classifier → risk policy  │   │
//! │  └───────────┘   └──────────────────┬───────────────────┘   │
//! │                                     ▼                       │
//! │            scaler.json · churn_model.onnx · model_columns   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use churn_core::logic::model::artifacts::verify_checksum;
use churn_core::{ArtifactBundle, ChurnPredictor, ModelMetadata};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "churn_server=debug,churn_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env().context("Failed to resolve configuration")?;

    tracing::info!("{} v{} starting...", churn_core::constants::APP_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Artifacts: {}", config.artifact_dir.display());

    // Load artifacts once, shared read-only afterwards
    let paths = config.artifact_paths();
    if let Some(expected) = &config.model_sha256 {
        verify_checksum(&paths.model, expected).context("Model checksum verification failed")?;
        tracing::info!("Model checksum verified");
    }

    let bundle = ArtifactBundle::load(&paths).context("Failed to load model artifacts")?;
    let predictor = ChurnPredictor::from_bundle(&bundle).context("Column schema does not fit the encoder")?;

    // Build application state
    let state = AppState {
        predictor: Arc::new(predictor),
        metadata: Some(Arc::new(bundle.metadata)),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<ChurnPredictor>,
    pub metadata: Option<Arc<ModelMetadata>>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors = if state.config.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/schema", get(handlers::model::schema))
        .route("/api/v1/model", get(handlers::model::status))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/predict/explain", post(handlers::predict::explain))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use churn_core::{Classifier, ColumnSchema, InferenceError, ScaleError, Scaler};

    struct IdentityScaler;

    impl Scaler for IdentityScaler {
        fn transform(&self, values: &[f32]) -> Result<Vec<f32>, ScaleError> {
            Ok(values.to_vec())
        }
    }

    struct FixedClassifier {
        width: usize,
        churn: f32,
    }

    impl Classifier for FixedClassifier {
        fn predict_probability(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
            if features.len() != self.width {
                return Err(InferenceError::ShapeMismatch {
                    expected: self.width,
                    actual: features.len(),
                });
            }
            Ok(vec![1.0 - self.churn, self.churn])
        }
    }

    fn app(width: usize, churn: f32) -> Router {
        let schema = ColumnSchema::new([
            "tenure",
            "MonthlyCharges",
            "TotalCharges",
            "Contract_One year",
            "Contract_Two year",
            "InternetService_Fiber optic",
            "InternetService_No",
            "PaperlessBilling_Yes",
        ])
        .unwrap();
        let predictor = ChurnPredictor::new(
            Arc::new(schema),
            Arc::new(IdentityScaler),
            Arc::new(FixedClassifier { width, churn }),
        )
        .unwrap();

        create_router(AppState {
            predictor: Arc::new(predictor),
            metadata: None,
            config: config::Config::default(),
        })
    }

    fn reference_body() -> Value {
        json!({
            "tenure": 12,
            "monthlyCharges": 70,
            "totalCharges": 1500,
            "contract": "One year",
            "internetService": "Fiber optic",
            "paymentMethod": "Electronic check",
            "paperlessBilling": "Yes"
        })
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(8, 0.5), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["schemaHash"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_predict_high_risk() {
        let (status, body) = send(app(8, 0.85), "POST", "/api/v1/predict", Some(reference_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["riskTier"], "High");
        assert_eq!(body["probabilityPercent"], 85);
        assert_eq!(body["recommendedAction"], "Offer discounts or long-term contract incentives.");
    }

    #[tokio::test]
    async fn test_predict_out_of_range_rejected() {
        let mut input = reference_body();
        input["tenure"] = json!(100);
        let (status, body) = send(app(8, 0.85), "POST", "/api/v1/predict", Some(input)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_predict_negative_tenure_rejected() {
        let mut input = reference_body();
        input["tenure"] = json!(-1);
        let (status, body) = send(app(8, 0.85), "POST", "/api/v1/predict", Some(input)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().unwrap().contains("tenure"));
    }

    #[tokio::test]
    async fn test_predict_unknown_category_unprocessable() {
        let mut input = reference_body();
        input["contract"] = json!("Three year");
        let (status, _) = send(app(8, 0.85), "POST", "/api/v1/predict", Some(input)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_predict_shape_rejection_is_failure() {
        let (status, body) = send(app(9, 0.85), "POST", "/api/v1/predict", Some(reference_body())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("Prediction failed"));
        assert!(body.get("riskTier").is_none());
    }

    #[tokio::test]
    async fn test_explain_returns_vector() {
        let (status, body) = send(app(8, 0.55), "POST", "/api/v1/predict/explain", Some(reference_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["riskTier"], "Medium");

        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 8);
        let ones: Vec<&str> = features
            .iter()
            .filter(|f| f["value"] == 1.0)
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(ones, vec!["Contract_One year", "InternetService_Fiber optic", "PaperlessBilling_Yes"]);
    }

    #[tokio::test]
    async fn test_schema_lists_unmapped_categories() {
        let (status, body) = send(app(8, 0.5), "GET", "/api/v1/schema", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["columnCount"], 8);
        assert_eq!(body["unmappedCategories"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_model_status() {
        let app = app(8, 0.5);
        send(app.clone(), "POST", "/api/v1/predict", Some(reference_body())).await;

        let (status, body) = send(app, "GET", "/api/v1/model", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["modelLoaded"], false);
        assert_eq!(body["engine"]["inferenceCount"], 1);
        let high_min = body["thresholds"]["highMin"].as_f64().unwrap();
        assert!((high_min - 0.7).abs() < 1e-6);
        assert!(body["thresholds"].get("high_min").is_none());
    }

    #[test]
    fn test_router_builds_in_production() {
        let config = config::Config {
            environment: "production".to_string(),
            ..Default::default()
        };
        let predictor = ChurnPredictor::new(
            Arc::new(ColumnSchema::new(["tenure", "MonthlyCharges", "TotalCharges"]).unwrap()),
            Arc::new(IdentityScaler),
            Arc::new(FixedClassifier { width: 3, churn: 0.1 }),
        )
        .unwrap();
        let app = create_router(AppState {
            predictor: Arc::new(predictor),
            metadata: None,
            config,
        });

        let (status, body) = tokio_test::block_on(send(app, "POST", "/api/v1/predict", Some(reference_body())));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["riskTier"], "Low");
    }
}
