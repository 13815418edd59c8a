use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::Value;

use super::common::ascii_fallback;
use super::traits::{DocumentRequest, Generator};
use super::{
    DocumentError, GeneratedDocument, LoadError, ProcuracaoGenerator, ProcuracaoRequest,
    ReciboGenerator, ReciboRequest, RenderError,
};
use crate::{AppState, ErrorResponse};

const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar o modelo do documento";
const RENDER_ERROR_MESSAGE: &str = "Erro ao gerar documento";

impl ResponseError for DocumentError {
    fn status_code(&self) -> StatusCode {
        match self {
            DocumentError::Validation(_) => StatusCode::BAD_REQUEST,
            DocumentError::Load(_) | DocumentError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            DocumentError::Validation(errors) => {
                let missing = errors.missing_fields();
                if missing.is_empty() {
                    ErrorResponse::bad_request(&errors.summary())
                } else {
                    ErrorResponse::missing_fields(missing)
                }
            }
            DocumentError::Load(_) => ErrorResponse::internal_error(LOAD_ERROR_MESSAGE),
            DocumentError::Render(_) => ErrorResponse::internal_error(RENDER_ERROR_MESSAGE),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Build the attachment response for a generated document.
pub fn document_response(document: GeneratedDocument) -> HttpResponse {
    let mut parameters = vec![DispositionParam::Filename(ascii_fallback(&document.filename))];
    if !document.filename.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: document.filename.clone().into_bytes(),
        }));
    }

    HttpResponse::Ok()
        .content_type(document.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters,
        })
        .body(document.bytes)
}

/// Decode `payload` into `R` and run `generator` on the blocking pool.
async fn generate<R, G>(generator: G, payload: Value) -> Result<HttpResponse, DocumentError>
where
    R: DocumentRequest + Send + 'static,
    G: Generator<R> + Send + 'static,
{
    let request = R::from_payload(payload).map_err(|errors| {
        log::info!("Rejected request: {}", errors.summary());
        errors
    })?;

    let document = web::block(move || generator.generate(request))
        .await
        .map_err(|e| {
            log::error!("Document generation task failed: {}", e);
            RenderError::Cancelled
        })?
        .map_err(|e| {
            match &e {
                DocumentError::Load(LoadError::Io { path, .. }) => {
                    log::error!("Template not available at {}: {}", path.display(), e)
                }
                DocumentError::Validation(_) => {}
                _ => log::error!("Document generation failed: {}", e),
            }
            e
        })?;

    log::info!(
        "Generated {} ({} bytes)",
        document.filename,
        document.bytes.len()
    );
    Ok(document_response(document))
}

#[utoipa::path(
    post,
    path = "/api/gerar-procuracao",
    tag = "Documentos",
    request_body = ProcuracaoRequest,
    responses(
        (status = 200, description = "Generated power of attorney", content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Template could not be rendered", body = ErrorResponse)
    )
)]
pub async fn gerar_procuracao(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, DocumentError> {
    log::info!("POST /api/gerar-procuracao");
    let generator = ProcuracaoGenerator::from_config(&state.config);
    generate::<ProcuracaoRequest, _>(generator, payload.into_inner()).await
}

#[utoipa::path(
    post,
    path = "/api/gerar-recibo",
    tag = "Documentos",
    request_body = ReciboRequest,
    responses(
        (status = 200, description = "Generated fee receipt", content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Template could not be rendered", body = ErrorResponse)
    )
)]
pub async fn gerar_recibo(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, DocumentError> {
    log::info!("POST /api/gerar-recibo");
    let generator = ReciboGenerator::from_config(&state.config);
    generate::<ReciboRequest, _>(generator, payload.into_inner()).await
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/gerar-procuracao").route(web::post().to(gerar_procuracao)))
        .service(web::resource("/gerar-recibo").route(web::post().to(gerar_recibo)));
}
