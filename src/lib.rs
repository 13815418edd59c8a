use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{error, http::header, web, App, HttpResponse, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod attorney;
pub mod config;
pub mod document;
pub mod health;
pub mod state;

pub use crate::state::AppState;

use crate::attorney::AttorneyDirectory;
use crate::config::AppConfig;
use crate::document::validation::MISSING_FIELDS_MESSAGE;

/// JSON error body returned by every endpoint.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Campos obrigatórios faltando")]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            missing_fields: None,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new(message)
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self {
            error: MISSING_FIELDS_MESSAGE.to_string(),
            missing_fields: Some(fields),
        }
    }
}

/// JSON extractor settings: undecodable bodies get the same error shape as
/// every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| {
            log::info!("Rejected JSON body: {}", err);
            let body = ErrorResponse::bad_request(&format!("JSON inválido: {}", err));
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}

/// Register the JSON settings and every `/api` route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .configure(health::config)
            .configure(attorney::routes::config)
            .configure(document::handlers::config),
    );
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health::health_check,
        crate::attorney::routes::get_all_attorneys,
        crate::document::handlers::gerar_procuracao,
        crate::document::handlers::gerar_recibo
    ),
    components(
        schemas(
            ErrorResponse,
            health::HealthResponse,
            attorney::model::Attorney,
            document::ProcuracaoRequest,
            document::ReciboRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service status."),
        (name = "Advogados", description = "Attorney records offered by the front-end."),
        (name = "Documentos", description = "Procuração and receipt generation.")
    )
)]
pub struct ApiDoc;

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    let attorneys = AttorneyDirectory::load(&config)?;
    log::info!(
        "Loaded {} attorney record(s); templates from {}",
        attorneys.len(),
        config.template_dir.display()
    );
    if !config.template_dir.is_dir() {
        log::warn!(
            "Template directory {} does not exist; generation requests will fail",
            config.template_dir.display()
        );
    }

    let bind_address = (config.host.clone(), config.port);
    let app_state = web::Data::new(AppState::new(config, attorneys));

    let prometheus = PrometheusMetricsBuilder::new("advocacia_docs_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {}", e))?;

    log::info!("Starting server at http://{}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = app_state
            .config
            .cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
