use actix_web::middleware::{Compress, Logger};
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod invoice;
pub mod state;

pub use crate::config::{ConfigError, ServerConfig};
pub use crate::state::{AppState, Clock, FixedClock, SystemClock};

use crate::invoice::validation::{ValidationError, ValidationErrors};

/// JSON error body for the `/api` routes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Per-field failures when the request body did not validate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationError>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            details: Vec::new(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    /// `BadRequest` carrying every field error of a rejected form.
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            details: errors.iter().cloned().collect(),
            ..Self::bad_request(&errors.to_message())
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::invoice::handlers::preview_invoice,
        crate::invoice::handlers::get_current_invoice,
    ),
    components(
        schemas(
            invoice::models::InvoiceForm,
            invoice::models::InvoiceRecord,
            invoice::models::InvoiceSummary,
            invoice::models::InvoicePreview,
            invoice::models::RenderedCopy,
            invoice::models::CopyLabel,
            invoice::validation::ValidationError,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Invoice", description = "Invoice preview endpoints.")
    )
)]
pub struct ApiDoc;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

pub async fn run() -> anyhow::Result<()> {
    init_logging();

    let config = ServerConfig::from_env()?;
    let app_state = web::Data::new(AppState::new());

    let prometheus = PrometheusMetricsBuilder::new("lucknow_invoice_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {}", e))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(invoice::handlers::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_constructors() {
        assert_eq!(ErrorResponse::not_found("x").error, "NotFound");
        assert_eq!(ErrorResponse::bad_request("x").error, "BadRequest");
        assert!(ErrorResponse::bad_request("x").details.is_empty());
    }

    #[test]
    fn test_validation_error_response() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::empty_field("plotNo", "House / Plot No."));

        let response = ErrorResponse::validation(&errors);
        assert_eq!(response.error, "BadRequest");
        assert_eq!(response.details.len(), 1);
        assert_eq!(response.details[0].field, "plotNo");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["details"][0]["field"], "plotNo");
        assert!(serde_json::to_value(ErrorResponse::not_found("x"))
            .unwrap()
            .get("details")
            .is_none());
    }

    #[test]
    fn test_openapi_lists_invoice_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/invoices/preview"));
        assert!(doc.paths.paths.contains_key("/api/invoices/current"));
    }
}
